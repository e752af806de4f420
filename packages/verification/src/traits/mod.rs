//! Collaborator contracts consumed by the verification pipeline.
//!
//! These traits define the seams to external collaborators: content
//! extraction, generative forensic models, and file-type sniffing.
//! Applications implement them; the core never depends on a concrete
//! transport or vendor.

pub mod extractor;
pub mod forensic;
pub mod media;
