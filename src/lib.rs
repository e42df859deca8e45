//! kubeprops: serves `secrets.yml` and `configs.yml` as JSON over HTTP,
//! falling back to `SECRETS_DATA` / `CONFIGS_DATA` when running on a
//! Kubernetes cluster.

pub mod cli;
pub mod config;
pub mod documents;
pub mod gateway;
pub mod infra;
pub mod logging;
