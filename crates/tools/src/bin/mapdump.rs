use anyhow::{Result, ensure};
use clap::Parser;
use faculty_core::mapgen::walkable_components;
use faculty_core::{TileKind, TilePos, generate_map};

/// Prints a generated map as ASCII with its staff rooms.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 64)]
    size: usize,
    /// Print map statistics only
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.size >= 24, "map size must be at least 24");

    let map = generate_map(args.seed, args.size);
    let grid = &map.grid;

    if !args.stats {
        let doors: Vec<TilePos> = map.staff_rooms.iter().map(|room| room.door).collect();
        for (y, row) in grid.to_ascii().lines().enumerate() {
            let line: String = row
                .chars()
                .enumerate()
                .map(|(x, glyph)| {
                    let pos = TilePos { y: y as i32, x: x as i32 };
                    if doors.contains(&pos) { '+' } else { glyph }
                })
                .collect();
            println!("{line}");
        }
        println!();
    }

    println!("Seed: {} Size: {}x{}", args.seed, grid.width(), grid.height());
    println!(
        "Floor: {} Wall: {} Staff: {}",
        grid.count(TileKind::Floor),
        grid.count(TileKind::Wall),
        grid.count(TileKind::StaffRoom)
    );
    println!("Walkable components: {}", walkable_components(grid).len());
    for (index, room) in map.staff_rooms.iter().enumerate() {
        println!(
            "Staff room {index}: x {}..={} y {}..={} door ({}, {})",
            room.min_x, room.max_x, room.min_y, room.max_y, room.door.x, room.door.y
        );
    }

    Ok(())
}
