pub mod exit_status;
