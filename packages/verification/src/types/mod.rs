//! Data model for the verification pipeline.

pub mod decision;
pub mod evidence;
pub mod request;
pub mod verdict;
