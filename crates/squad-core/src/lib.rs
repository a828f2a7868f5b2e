//! Squad Core - shared configuration for all Squad interfaces.
//!
//! - **config**: state directory layout, namespace selection and `.env.local` loading

pub mod config;

pub use config::{
    config_dir, ensure_state_dirs, env_file, history_file, load_env, namespace, resolve_dir,
    state_dir,
};
