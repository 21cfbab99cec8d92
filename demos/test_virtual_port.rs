use std::error::Error;
use std::thread::sleep;
use std::time::Duration;

use virtualmidi::{Direction, Driver, VirtualPort};

fn main() {
    env_logger::init();

    match run() {
        Ok(_) => (),
        Err(err) => println!("Error: {}", err),
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let driver = Driver::load()?;

    println!("Creating virtual port ...");
    let mut port = VirtualPort::open(&driver, "virtualmidi-test", Direction::TransmitOnly)?;
    println!("Port '{}' is open, connect to it from another application", port.name());
    sleep(Duration::from_secs(4));

    println!("Starting to send messages ...");
    for note in [60, 64, 67, 72] {
        port.send(&[0x90, note, 100])?;
        sleep(Duration::from_millis(200));
        port.send(&[0x80, note, 0])?;
        sleep(Duration::from_millis(50));
    }

    println!("Closing virtual port ...");
    port.close();
    Ok(())
}
