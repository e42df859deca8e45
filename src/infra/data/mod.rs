//! Runtime data plumbing.
//!
//! 1. **Detect** — classify the process as cluster or local
//! 2. **Preprocess** — on local runs, load the YAML files into a snapshot
//!    and mirror them into `SECRETS_DATA` / `CONFIGS_DATA`
//! 3. **Serve** — look documents up in the frozen snapshot, falling back
//!    to the environment mirrors

pub mod detector;
pub mod env_source;
pub mod snapshot;
pub mod store;

pub use detector::{ClusterDetector, ClusterSignals, EnvironmentMode};
pub use env_source::{EnvSource, ProcessEnv, StaticEnv};
pub use snapshot::{preprocess, DocumentReport, DocumentSnapshot, LoadOutcome, StartupReport};
pub use store::DocumentStore;
