//! Generation profiles.
//!
//! Profiles are presets for the program-shape configuration. `minimal`
//! produces small flat programs for quick sanity checks; `full` exercises
//! every statement and expression kind.

use thiserror::Error;

use crate::stmt::GenConfig;

/// A named generation preset.
#[derive(Debug, Clone)]
pub struct Profile {
    pub gen: GenConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile '{name}', available profiles: {available}")]
pub struct UnknownProfileError {
    pub name: String,
    available: String,
}

impl UnknownProfileError {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            available: available_profiles().join(", "),
        }
    }
}

/// Names accepted by [`get_profile`].
pub fn available_profiles() -> Vec<&'static str> {
    vec!["minimal", "full"]
}

/// Look up a profile by name.
pub fn get_profile(name: &str) -> Result<Profile, UnknownProfileError> {
    match name {
        "minimal" => Ok(minimal_profile()),
        "full" => Ok(full_profile()),
        _ => Err(UnknownProfileError::new(name)),
    }
}

/// Small, flat programs: one or two functions, no control flow.
/// Target: quick smoke runs against an implementation under test.
fn minimal_profile() -> Profile {
    Profile {
        gen: GenConfig {
            functions: (1, 2),
            params_per_function: (0, 1),
            statements_per_block: (2, 4),
            // Depth 0 means only flat statements are ever chosen.
            max_block_depth: 0,
            if_probability: 0.0,
            while_probability: 0.0,
            switch_probability: 0.0,
            modify_probability: 0.15,
            echo_probability: 0.3,
            break_continue_probability: 0.0,
        },
    }
}

/// Full coverage: several functions, nested control flow, compound
/// assignments, switches over enums.
fn full_profile() -> Profile {
    Profile {
        gen: GenConfig {
            functions: (2, 4),
            params_per_function: (0, 3),
            statements_per_block: (3, 6),
            max_block_depth: 2,
            if_probability: 0.25,
            while_probability: 0.2,
            switch_probability: 0.15,
            modify_probability: 0.25,
            echo_probability: 0.3,
            break_continue_probability: 0.1,
        },
    }
}
