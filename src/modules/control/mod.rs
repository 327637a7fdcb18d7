use crate::modules::traits::Control;
use crate::util::objects::configuration::Configuration;

use serde_json::Value;

mod dry_run;
mod traci;

pub enum ControlModule {
    Traci(traci::TraciControl),
    DryRun(dry_run::DryRunControl)
}

use ControlModule::*;

/// Create the control module named in the configuration. For TraCI this connects to the server.
pub fn get_module(config: &Configuration) -> Result<ControlModule, String> {
    return Ok(match config.control_type.to_lowercase().as_str() {
        traci::TraciControl::MODULE_NAME => Traci(*traci::TraciControl::new(config)?),
        dry_run::DryRunControl::MODULE_NAME => DryRun(*dry_run::DryRunControl::new()),
        unknown => {
            let msg = format!("Unknown control module: '{}'", unknown);
            error!("{}", msg);
            return Err(msg)
        }
    })
}

impl Control for ControlModule {
    fn send_file(&mut self, args: &[Value]) -> Result<Value, String> {
        return match self {
            Traci(control) => control.send_file(args),
            DryRun(control) => control.send_file(args)
        }
    }

    fn get_version(&mut self) -> Result<Value, String> {
        return match self {
            Traci(control) => control.get_version(),
            DryRun(control) => control.get_version()
        }
    }

    fn next_sim_time_step(&mut self, args: &[Value]) -> Result<Value, String> {
        return match self {
            Traci(control) => control.next_sim_time_step(args),
            DryRun(control) => control.next_sim_time_step(args)
        }
    }

    fn close(&mut self) -> Result<Value, String> {
        return match self {
            Traci(control) => control.close(),
            DryRun(control) => control.close()
        }
    }
}
