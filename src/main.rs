use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip8_vm::emulator::{Config, Emulator, SpriteEdges, Summary};
use chip8_vm::emulator::{input::DummyInput, output::DummyOutput};

/// Run a CHIP-8 program without a screen.
#[derive(StructOpt, Debug)]
#[structopt(name = "chip8-vm")]
struct Opt {
    /// Number of cycles to run
    #[structopt(short, long, default_value = "10000")]
    cycles: usize,

    /// Cycles per second. Timers tick at 60 Hz relative to this
    #[structopt(long, default_value = "600")]
    hz: u32,

    /// What to do with sprites drawn past the screen edge: wrap, clip or error
    #[structopt(long, default_value = "wrap")]
    sprite_edges: SpriteEdges,

    /// Do not load the built-in font at address 0
    #[structopt(long)]
    no_font: bool,

    /// Print the screen when done
    #[structopt(short, long)]
    print_screen: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let config = Config {
        sprite_edges: opt.sprite_edges,
        load_font: !opt.no_font,
    };
    log::debug!("{:?}", config);

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_config(config, DummyInput, DummyOutput::new());
    emulator.load(&program)?;

    let hz = opt.hz.max(1);
    let cycles_per_tick = (hz / 60).max(1) as usize;
    let pause = Duration::from_secs(1) / hz;

    // Start execution
    let mut summary = Summary::default();
    for cycle in 0..opt.cycles {
        summary.record(emulator.step()?);
        if (cycle + 1) % cycles_per_tick == 0 {
            emulator.tick_timers();
        }
        std::thread::sleep(pause);
    }

    log::info!(
        "Ran {} cycles: {} executed, {} waiting for a key, {} unsupported",
        summary.cycles(),
        summary.executed,
        summary.awaiting,
        summary.unsupported
    );

    if opt.print_screen {
        print!("{}", emulator.framebuffer());
    }

    Ok(())
}
