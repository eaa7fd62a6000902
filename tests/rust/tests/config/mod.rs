//! Config loading tests
//!
//! File-based normalization of direct and `mcpServers` configs.

mod load;
