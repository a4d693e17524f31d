//! Line-driven counter that mirrors its state into the terminal title.
//!
//! Commands: `+`, `-`, `reset`, `pause`, `quit`. The previous title is put
//! back on exit (set `TETHER_ORIGINAL_TITLE` to tell the demo what it was).

use std::io::{self, BufRead};
use std::rc::Rc;

use tether_core::Host;
use tether_hooks::*;

type Title = Rc<TerminalTitle<io::Stdout>>;

enum Command {
    Increment,
    Decrement,
    Reset,
    Pause,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "+" | "inc" => Command::Increment,
            "-" | "dec" => Command::Decrement,
            "reset" => Command::Reset,
            "pause" => Command::Pause,
            "quit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_owned()),
        }
    }
}

struct Ui {
    counter: Counter<i32>,
    paused: Toggle,
    label: String,
}

fn app(title: &Title) -> Ui {
    let counter = remember_counter(
        "count",
        CounterOptions::new()
            .min(0)
            .max(10)
            .on_change(|v| log::info!("count -> {v}")),
    );
    let paused = remember_toggle("paused", false);

    let label = if paused.value() {
        "paused".to_owned()
    } else {
        format!("count {}", counter.count())
    };
    use_title(
        "window",
        title.clone(),
        &label,
        TitleOptions::new().template("%s - tether"),
    );

    Ui {
        counter,
        paused,
        label,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let original = std::env::var("TETHER_ORIGINAL_TITLE").unwrap_or_else(|_| "shell".into());
    let title: Title = Rc::new(TerminalTitle::new(io::stdout(), original));
    let mut host = Host::new();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let ui = host.compose(|| app(&title));
        let bounds = match (ui.counter.is_min(), ui.counter.is_max()) {
            (true, _) => " [min]",
            (_, true) => " [max]",
            _ => "",
        };
        println!("{}{bounds}", ui.label);

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        match Command::parse(&line) {
            Command::Increment => ui.counter.increment(),
            Command::Decrement => ui.counter.decrement(),
            Command::Reset => ui.counter.reset(),
            Command::Pause => ui.paused.toggle(),
            Command::Quit => break,
            Command::Unknown(cmd) => log::warn!("unknown command {cmd:?}"),
        }
    }

    host.unmount();
    Ok(())
}
