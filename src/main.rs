use clap::Parser;
use colored::Colorize;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use subnet_helper::models::SubnetError;
use subnet_helper::output::{
    render_address, render_base, render_input_error, render_json, render_mask, render_partition,
};
use subnet_helper::{parse_count, plan, resolve_address, resolve_mask, Report};

/// Suggest valid IPv4 inputs and split a network into equally sized subnets.
///
/// Values not given on the command line are prompted for.
#[derive(Parser, Debug)]
#[command(name = "subnet-helper", version)]
struct Args {
    /// IP address of the base network
    #[arg(long)]
    ip: Option<String>,
    /// Subnet mask or CIDR prefix length
    #[arg(long)]
    mask: Option<String>,
    /// Number of subnets to create
    #[arg(long, allow_hyphen_values = true)]
    count: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Disable colored output
    #[arg(long)]
    no_color: bool,
    /// log4rs configuration file
    #[arg(long, default_value = "log4rs.yml")]
    log_config: PathBuf,
}

fn input(given: Option<&str>, prompt: &str) -> io::Result<String> {
    if let Some(value) = given {
        return Ok(value.to_string());
    }
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
}

fn run_json(args: &Args) -> Result<ExitCode, Box<dyn Error>> {
    let ip = input(args.ip.as_deref(), "Enter an IP address: ")?;
    let mask = input(args.mask.as_deref(), "Enter a subnet mask or CIDR prefix length: ")?;
    let count = input(
        args.count.as_deref(),
        "Enter the number of subnets you want to create: ",
    )?;
    match plan(&ip, &mask, &count) {
        Ok(report) => {
            println!("{}", render_json(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(SubnetError::Input(e)) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn run_interactive(args: &Args) -> Result<ExitCode, Box<dyn Error>> {
    println!("{}", "Subnet Helper".bold());

    let ip = input(args.ip.as_deref(), "Enter an IP address: ")?;
    let address = match resolve_address(&ip) {
        Ok(address) => address,
        Err(e) => {
            print!("{}", render_input_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };
    print!("{}", render_address(&ip, &address));

    let mask_raw = input(args.mask.as_deref(), "Enter a subnet mask or CIDR prefix length: ")?;
    let mask = resolve_mask(&mask_raw);
    print!("{}", render_mask(&mask));
    print!("{}", render_base(address.value, mask.value));

    let count_raw = input(
        args.count.as_deref(),
        "Enter the number of subnets you want to create: ",
    )?;
    let count = match parse_count(&count_raw) {
        Ok(count) => count,
        Err(e) => {
            print!("{}", render_input_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let report = Report::new(&ip, address, &mask_raw, mask, count);
    print!("{}", render_partition(&report));
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    let args = Args::parse();
    if let Err(e) = subnet_helper::logging::init(&args.log_config) {
        eprintln!("Error initializing logging: {e}");
    }
    if args.no_color {
        colored::control::set_override(false);
    }
    log::info!("#Start main()");

    let result = if args.json {
        run_json(&args)
    } else {
        run_interactive(&args)
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}
