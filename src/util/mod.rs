//! Utility modules for wadloxide.
//!
//! Contains `QName` handling shared by the reader, the writer and the
//! documentation markup model.

pub mod qname;
