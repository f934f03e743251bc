use std::process::ExitCode;

use mcapi_conformance::config::HarnessConfig;
use mcapi_conformance::logging::init_tracing;
use mcapi_conformance::report::ConsoleReporter;
use mcapi_conformance::suite::{exit_code, Suite};

fn main() -> ExitCode {
    let config = HarnessConfig::from_env();
    init_tracing(&config.log_filter);

    let result = Suite::standard(config).run(&mut ConsoleReporter);
    exit_code(&result)
}
