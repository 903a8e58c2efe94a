//! tck-runner: ejecuta la suite de conformidad de exit status contra el
//! runtime en memoria e imprime un resumen por caso.
//!
//! Variables de entorno:
//! - `BATCH_JOB_TIMEOUT_MS`: espera máxima por ejecución (por defecto 30000).
//! - `RUST_LOG`: nivel de log (por defecto `info`).

use std::process::ExitCode;

use batch_tck::{exit_status_cases, JobOperatorBridge};
use log::error;

fn main() -> ExitCode {
    // .env antes de inicializar el logger para que RUST_LOG también pueda venir de ahí
    batch_core::config::init_dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bridge = match JobOperatorBridge::new() {
        Ok(b) => b,
        Err(e) => {
            error!("no se pudo construir el operador: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("--- Iniciando suite de exit status (timeout {:?}) ---",
             bridge.operator().config().job_timeout());

    let cases = exit_status_cases();
    let mut failures = 0usize;
    for case in &cases {
        match (case.run)(&bridge) {
            Ok(()) => println!("[OK]   {}", case.name),
            Err(e) => {
                failures += 1;
                println!("[FAIL] {}: {e}", case.name);
            }
        }
    }

    println!("Resultado: {} de {} casos OK", cases.len() - failures, cases.len());
    if failures == 0 {
        println!("!Validación exit status: OK");
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
