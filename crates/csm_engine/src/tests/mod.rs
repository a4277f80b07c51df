//! Cross-module tests driving the whole frame pipeline

mod config_files;
