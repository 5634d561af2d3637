// Crate entry point. Re-export modules so tests and binaries can import them easily.
//
// Responsibilities
// - Only declare and expose modules. No storage logic here.
//
// How it is used
// - A host runtime builds an `InMemoryPersistence` from the shell and injects the
//   journal and snapshot store handles into its persistent actors.

pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod config;
    pub mod telemetry;
}

pub mod modules {
    pub mod journal {
        pub mod core {
            pub mod journal_log;
            pub mod record;
        }
        pub mod ports;
        pub mod adapters {
            pub mod in_memory;
        }
    }
    pub mod snapshots {
        pub mod core {
            pub mod selection;
            pub mod stash;
        }
        pub mod ports;
        pub mod adapters {
            pub mod in_memory;
        }
    }
}

pub mod shell;
