//! Property-based tests for path naming and registration

mod path_naming;
