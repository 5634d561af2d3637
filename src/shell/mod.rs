// Composition root for the in-memory persistence plugins.
//
// Responsibilities
// - Read config from the environment.
// - Instantiate the journal and snapshot store.
// - Hand out handles a host injects into its persistent actors, and tear them down.

pub mod state;

pub use state::InMemoryPersistence;
