use freerect::AtlasPacker;

fn main() {
    env_logger::init();

    let mut packer = AtlasPacker::new((256, 256));

    for &size in &[(128, 128), (128, 64), (64, 200), (100, 100)] {
        match packer.insert(size) {
            Some(placed) => println!("{}x{} -> {:?}", size.0, size.1, placed.min()),
            None => println!("{}x{} -> did not fit", size.0, size.1),
        }
    }
}
