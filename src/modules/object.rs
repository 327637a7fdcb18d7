/// Command line arguments shared by all operations
pub struct Arguments {
    pub dry_run: bool,
    pub verbose: bool,
    pub debug: bool,
    pub quiet: bool,
    pub config: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub scenario: Option<String>,
    pub steps: u32,
    pub step_size: f64
}

impl Arguments {
    pub fn new() -> Self {
        return Arguments {
            dry_run: false,
            verbose: false,
            debug: false,
            quiet: false,
            config: None,
            host: None,
            port: None,
            scenario: None,
            steps: 1,
            step_size: 0.4
        }
    }
}
