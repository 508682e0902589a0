use data_loader::Workbook;
use std::path::Path;
use std::time::Instant;

fn main() {
    let data_dir = Path::new("data/sheets");

    println!("Loading life-log worksheets...\n");

    let start = Instant::now();
    let workbook = Workbook::load_from_dir(data_dir)
        .expect("Failed to load worksheets");
    let elapsed = start.elapsed();

    let (activities, diary, films, restaurants) = workbook.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Activities: {}", activities);
    println!("Diary entries: {}", diary);
    println!("Films: {}", films);
    println!("Restaurants: {}", restaurants);
    println!("Dangling diary entries: {}", workbook.dangling_log_entries());
}
