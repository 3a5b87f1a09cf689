// SkillBridge - Matching Engine Core
//
// This crate turns a changing collection of time-boxed skill "asks" and
// "offers" into a per-viewer relevance ranking, pairwise ask/offer match
// scores, a deduplicated relationship graph, and continuously-correct
// expiration state. Storage, identity, and presentation are external
// collaborators behind the kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
