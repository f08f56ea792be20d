use offline::{script, SwConfig};

fn main() {
    print!("{}", script::render(&SwConfig::default()));
}
