use crate::modules::control::{self, ControlModule};
use crate::modules::object::Arguments;
use crate::modules::wrapper::ControlWrapper;
use crate::util::io::json;
use crate::util::objects::configuration::Configuration;
use crate::{bool_result, log_error, try_option};

use argparse::{ArgumentParser, List, Store, StoreOption, StoreTrue};
use serde_json::Value;
use std::io::Write;

/// Failure of a run, grouped by what the exit code should tell
#[derive(Debug, PartialEq)]
pub enum RunError {
    Configuration(String),
    Connection(String),
    Operation(String)
}

impl RunError {
    pub fn exit_code(&self) -> i32 {
        return match self {
            RunError::Configuration(_) => 1,
            RunError::Connection(_) => 2,
            RunError::Operation(_) => 3
        }
    }

    pub fn message(&self) -> &str {
        return match self {
            RunError::Configuration(msg) | RunError::Connection(msg) | RunError::Operation(msg) => msg
        }
    }
}

/// What to do, as given on the command line
pub struct Invocation {
    pub operation: String,
    pub operands: Vec<String>,
    pub args: Arguments
}

pub fn parse_arguments() -> Invocation {
    let mut operation = String::new();
    let mut operands: Vec<String> = vec![];
    let mut args = Arguments::new();

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Client to control a remote simulation over TraCI");
        parser.refer(&mut operation)
            .add_argument("operation", Store, "Operation to perform (version,send-file,step,close,run)")
            .required();
        parser.refer(&mut operands)
            .add_argument("arguments", List, "Arguments forwarded to the operation, parsed as json if possible");
        parser.refer(&mut args.config)
            .add_option(&["-c", "--config"], StoreOption, "Configuration file path");
        parser.refer(&mut args.host)
            .add_option(&["--host"], StoreOption, "Host of the simulation server");
        parser.refer(&mut args.port)
            .add_option(&["--port"], StoreOption, "Port of the simulation server");
        parser.refer(&mut args.dry_run)
            .add_option(&["--dry-run"], StoreTrue, "Print calls instead of sending them");
        parser.refer(&mut args.scenario)
            .add_option(&["-s", "--scenario"], StoreOption, "Scenario file to simulate (run)");
        parser.refer(&mut args.steps)
            .add_option(&["--steps"], Store, "Number of simulation steps (run)");
        parser.refer(&mut args.step_size)
            .add_option(&["--step-size"], Store, "Simulation time advanced per step (run)");
        parser.refer(&mut args.verbose)
            .add_option(&["-v", "--verbose", "--trace"], StoreTrue, "Print additional trace information");
        parser.refer(&mut args.debug)
            .add_option(&["-d", "--debug"], StoreTrue, "Print additional debug information");
        parser.refer(&mut args.quiet)
            .add_option(&["-q", "--quiet"], StoreTrue, "Only print warnings and errors");
        parser.parse_args_or_exit();
    }

    return Invocation { operation, operands, args };
}

pub fn main(invocation: &Invocation) -> Result<(), RunError> {
    let args = &invocation.args;
    let config = Configuration::load(args).map_err(RunError::Configuration)?;
    let operands: Vec<Value> = invocation.operands.iter().map(|operand| json::from_argument(operand)).collect();

    // Validate before connecting
    let operation = invocation.operation.as_str();
    match operation {
        "version" | "send-file" | "step" | "close" => {},
        "run" => {
            check_run_arguments(args).map_err(RunError::Configuration)?;
        },
        unknown => {
            let msg = format!("Unknown operation: '{}'", unknown);
            error!("{}", msg);
            return Err(RunError::Configuration(msg));
        }
    }

    let module = control::get_module(&config).map_err(RunError::Connection)?;
    let mut wrapper = ControlWrapper::new(module);

    return execute(operation, &operands, args, &mut wrapper).map_err(RunError::Operation);
}

fn check_run_arguments(args: &Arguments) -> Result<(), String> {
    try_option!(args.scenario.as_ref(), "Operation 'run' requires a scenario (--scenario)");
    return bool_result!(args.step_size > 0.0, (), format!("Step size has to be positive, got {}", args.step_size));
}

/**
  * Perform one operation. Single operations are followed by a close, so that the
  * server is not left waiting for further commands.
  */
fn execute<W: Write>(operation: &str, operands: &[Value], args: &Arguments, wrapper: &mut ControlWrapper<ControlModule, W>) -> Result<(), String> {
    let result = match operation {
        "version" => wrapper.get_version(),
        "send-file" => wrapper.send_file(operands),
        "step" => wrapper.next_step(operands),
        "close" => return wrapper.close().map(|_| ()),
        "run" => return simulate(args, wrapper),
        unknown => Err(format!("Unknown operation: '{}'", unknown))
    };

    if result.is_err() {
        log_error!(wrapper.close());
        return result.map(|_| ());
    }

    return wrapper.close().map(|_| ());
}

/// Load the scenario and advance the simulation step by step, then close
fn simulate<W: Write>(args: &Arguments, wrapper: &mut ControlWrapper<ControlModule, W>) -> Result<(), String> {
    let scenario = try_option!(args.scenario.as_ref(), "Operation 'run' requires a scenario (--scenario)");

    let result = run_steps(scenario, args, wrapper);
    if result.is_err() {
        log_error!(wrapper.close());
        return result;
    }

    return wrapper.close().map(|_| ());
}

fn run_steps<W: Write>(scenario: &str, args: &Arguments, wrapper: &mut ControlWrapper<ControlModule, W>) -> Result<(), String> {
    wrapper.get_version()?;
    wrapper.send_file(&[Value::String(scenario.to_string())])?;

    for step in 1..=args.steps {
        let target_time = step as f64 * args.step_size;
        debug!("Step {}/{} to simulation time {}", step, args.steps, target_time);
        wrapper.next_step(&[serde_json::json!(target_time)])?;
    }

    info!("Simulated {} step(s) of scenario '{}'", args.steps, scenario);
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dry_run_module() -> ControlModule {
        let mut args = Arguments::new();
        args.dry_run = true;
        let config = Configuration::load(&args).unwrap();
        control::get_module(&config).unwrap()
    }

    fn invocation(operation: &str, configure: fn(&mut Arguments)) -> Invocation {
        let mut args = Arguments::new();
        args.dry_run = true;
        configure(&mut args);
        Invocation { operation: operation.to_string(), operands: vec![], args }
    }

    #[test]
    fn single_operation_is_followed_by_close() {
        let mut output = vec![];
        {
            let mut wrapper = ControlWrapper::with_output(dry_run_module(), &mut output);
            execute("step", &[serde_json::json!(1.0)], &Arguments::new(), &mut wrapper).unwrap();
        }

        // step and close
        assert_eq!(String::from_utf8(output).unwrap(), "null\nnull\n");
    }

    #[test]
    fn run_prints_every_result() {
        let mut args = Arguments::new();
        args.scenario = Some(String::from("scenarios/corridor.scenario"));
        args.steps = 3;

        let mut output = vec![];
        {
            let mut wrapper = ControlWrapper::with_output(dry_run_module(), &mut output);
            simulate(&args, &mut wrapper).unwrap();
        }

        // version, send file, three steps and close
        assert_eq!(String::from_utf8(output).unwrap(), "null\n".repeat(6));
    }

    #[test]
    fn unknown_operation_is_a_configuration_error() {
        let result = main(&invocation("pause", |_| {}));
        assert_eq!(result.map_err(|err| err.exit_code()), Err(1));
    }

    #[test]
    fn run_without_scenario_is_rejected_before_connecting() {
        let result = main(&invocation("run", |args| args.dry_run = false));
        assert_eq!(result.map_err(|err| err.exit_code()), Err(1));
    }

    #[test]
    fn non_positive_step_size_is_rejected() {
        let result = main(&invocation("run", |args| {
            args.scenario = Some(String::from("a.scenario"));
            args.step_size = 0.0;
        }));
        assert!(result.unwrap_err().message().contains("Step size"));
    }

    #[test]
    fn dry_run_operations_succeed() {
        let mut output = vec![];
        {
            let mut wrapper = ControlWrapper::with_output(dry_run_module(), &mut output);
            execute("version", &[], &Arguments::new(), &mut wrapper).unwrap();
            execute("close", &[], &Arguments::new(), &mut wrapper).unwrap();
        }

        // version and close, then the explicit close
        assert_eq!(String::from_utf8(output).unwrap(), "null\n".repeat(3));
    }

    #[test]
    fn unreachable_server_is_a_connection_error() {
        // bind and drop to get a port nobody listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let mut config_file = std::env::temp_dir();
        config_file.push(format!("simcontrol-config-{}.json", std::process::id()));
        std::fs::write(&config_file, format!("{{\"host\": \"127.0.0.1\", \"port\": {}, \"connect_retries\": 0}}", port)).unwrap();

        let mut args = Arguments::new();
        args.config = Some(config_file.to_string_lossy().into_owned());
        let result = main(&Invocation { operation: String::from("version"), operands: vec![], args });
        std::fs::remove_file(&config_file).unwrap();

        assert_eq!(result.map_err(|err| err.exit_code()), Err(2));
    }
}
