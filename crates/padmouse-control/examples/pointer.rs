use padmouse_control::{MouseButton, Performer, WheelDirection};

fn usage() -> ! {
    eprintln!(
        "Usage: pointer move <dx> <dy> | pointer click <left|middle|right> | pointer wheel <up|down|left|right>"
    );
    std::process::exit(64);
}

fn parse_i32(value: Option<String>, name: &str) -> i32 {
    let Some(v) = value else { usage() };
    match v.parse::<i32>() {
        Ok(num) => num,
        Err(_) => {
            eprintln!("Invalid {name} value '{v}'. Must be an integer.");
            std::process::exit(64);
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| usage());

    let mut performer = match Performer::new() {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Failed to initialize input performer: {err}");
            std::process::exit(1);
        }
    };

    let result = match command.as_str() {
        "move" => {
            let dx = parse_i32(args.next(), "dx");
            let dy = parse_i32(args.next(), "dy");
            performer.move_pointer(dx, dy)
        }
        "click" => {
            let button: MouseButton = match args.next().map(|s| s.parse()) {
                Some(Ok(button)) => button,
                Some(Err(err)) => {
                    eprintln!("{err}");
                    std::process::exit(64);
                }
                None => usage(),
            };
            performer
                .pointer_down(button)
                .and_then(|()| performer.pointer_up(button))
        }
        "wheel" => {
            let direction = match args.next().as_deref() {
                Some("up") => WheelDirection::Up,
                Some("down") => WheelDirection::Down,
                Some("left") => WheelDirection::Left,
                Some("right") => WheelDirection::Right,
                _ => usage(),
            };
            performer.wheel(direction)
        }
        _ => usage(),
    };

    if let Err(err) = result {
        eprintln!("Failed to perform '{command}': {err}");
        std::process::exit(1);
    }
}
