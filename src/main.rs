use env_logger::Env;
use structopt::StructOpt;

use simtel::cliopt::CliOpt;
use simtel::generator::Generator;
use simtel::output::{JsonEncoder, Sink};
use simtel::runner::{Cancellation, Runner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opt = CliOpt::from_args();

    let sink = Sink::open(&opt.output, opt.open_mode()).map_err(|e| {
        log::error!("{}", e);
        e
    })?;

    let mut runner = Runner::new(
        Generator::new(opt.bounds()),
        Box::new(JsonEncoder::new()),
        sink,
    )
    .with_limit(opt.count);

    if let Err(e) = runner.run(&Cancellation::never()) {
        log::error!("{} error, giving up: {}", e.kind(), e);
        return Err(e.into());
    }

    Ok(())
}
