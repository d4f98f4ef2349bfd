//! Integration tests for the celebration loop.

mod mock_status;
mod party_run;
