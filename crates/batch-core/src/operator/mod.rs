//! API de operación de jobs: arranque, espera y consulta de ejecuciones.

mod job_operator;

pub use job_operator::JobOperator;
