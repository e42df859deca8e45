/// Default configuration constants used across the system.

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default bind host (all interfaces).
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// Default secrets document, relative to the working directory.
pub const DEFAULT_SECRETS_FILE: &str = "secrets.yml";

/// Default configs document, relative to the working directory.
pub const DEFAULT_CONFIGS_FILE: &str = "configs.yml";

/// JSON mirror of the secrets document.
pub const SECRETS_DATA_ENV: &str = "SECRETS_DATA";

/// JSON mirror of the configs document.
pub const CONFIGS_DATA_ENV: &str = "CONFIGS_DATA";

/// Set by Kubernetes for every pod with service discovery enabled.
pub const KUBERNETES_SERVICE_HOST_ENV: &str = "KUBERNETES_SERVICE_HOST";

/// Mounted into pods that run with a service account.
pub const DEFAULT_SERVICE_ACCOUNT_PATH: &str = "/var/run/secrets/kubernetes.io/serviceaccount";

/// Maximum size for a service config file (1 MB).
pub const MAX_CONFIG_FILE_BYTES: u64 = 1024 * 1024;

/// Default tracing directive for this crate.
pub const DEFAULT_LOG_DIRECTIVE: &str = "kubeprops=info";
