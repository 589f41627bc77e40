//! Example: Load and inspect an EGG file.
//!
//! Run with: cargo run --example load_egg -- assets/box.egg
//! Add `--json` to dump the whole scene graph instead of a summary.

use std::env;

use anyhow::Context;
use egg_core::egg::{load_egg, Animation, Group, Joint, Table};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: load_egg <path-to-egg-file> [--json]");
        println!("\nExamples:");
        println!("  cargo run --example load_egg -- assets/box.egg");
        println!("  cargo run --example load_egg -- assets/walk.egg --json");
        return Ok(());
    }

    let path = &args[1];
    let scene = load_egg(path).with_context(|| format!("Error loading EGG file {}", path))?;

    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&scene)?);
        return Ok(());
    }

    println!("\n=== {} ===", path);
    println!("Coordinate system: {}", scene.coordinate_system);
    if let Some(comment) = &scene.comment {
        println!("Comment: {}", comment);
    }
    println!("Top-level groups: {}", scene.data.len());
    println!("Polygons: {}", scene.polygon_count());

    println!("\n--- Textures ---");
    for texture in scene.textures() {
        println!("  {} -> {}", texture.name, texture.filepath);
    }

    println!("\n--- Vertex Pools ---");
    for pool in scene.vertex_pools() {
        println!("  {} - {} vertices", pool.name, pool.references.len());
    }

    println!("\n--- Hierarchy ---");
    for group in &scene.data {
        print_group(group, 1);
    }

    Ok(())
}

fn print_group(group: &Group, depth: usize) {
    let indent = "  ".repeat(depth);
    match group {
        Group::Entity(entity) => {
            let collide = if entity.is_collision {
                format!(" [collide: {}]", entity.collision_type)
            } else {
                String::new()
            };
            println!("{}Group {}{}", indent, entity.name, collide);
            for member in &entity.members {
                print_group(member, depth + 1);
            }
        }
        Group::Joint(joint) => print_joint(joint, depth),
        Group::Table(table) => print_table(table, depth),
        Group::Polygon(_) => {}
        other => println!("{}{}", indent, other.name()),
    }
}

fn print_joint(joint: &Joint, depth: usize) {
    let indent = "  ".repeat(depth);
    let origin = joint
        .transform
        .map(|t| t.rows()[3])
        .unwrap_or([0.0, 0.0, 0.0, 1.0]);
    println!(
        "{}Joint {} at ({:.2}, {:.2}, {:.2})",
        indent, joint.name, origin[0], origin[1], origin[2]
    );
    for child in &joint.joints {
        print_joint(child, depth + 1);
    }
}

fn print_table(table: &Table, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{}Table {}", indent, table.name);
    for bundle in &table.bundles {
        println!("{}  Bundle {}", indent, bundle.name);
        for inner in &bundle.tables {
            print_table(inner, depth + 2);
        }
    }
    for inner in &table.tables {
        print_table(inner, depth + 1);
    }
    for animation in &table.animations {
        match animation {
            Animation::XfmS(anim) => {
                let frames = anim.animations.first().map_or(0, |a| a.values.len());
                println!(
                    "{}  Xfm$Anim_S$ {} - {} channels, {} frames @ {} fps",
                    indent,
                    anim.name,
                    anim.animations.len(),
                    frames,
                    anim.fps
                );
            }
            Animation::S(anim) => {
                println!("{}  S$Anim {} - {} values", indent, anim.variable, anim.values.len());
            }
            Animation::Xfm(anim) => {
                println!(
                    "{}  Xfm$Anim {} - {} frames @ {} fps",
                    indent, anim.name, anim.frames.rows, anim.fps
                );
            }
        }
    }
}
