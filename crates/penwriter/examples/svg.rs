use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Path, Rectangle};

use penwriter::{FontTable, LayoutParams, MotionInstruction, render, scale};

/// Build an SVG path of everything drawn with the pen down.
///
/// Machine `y` grows upward, so it is flipped for SVG.
fn instructions_to_svg_path(
    instructions: &[MotionInstruction],
    scale: f32,
    margin: f32,
) -> (Data, (f32, f32)) {
    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for instruction in instructions {
        if let MotionInstruction::MoveTo { x, y } | MotionInstruction::DrawTo { x, y } = *instruction
        {
            min_x = min_x.min(x as f32);
            min_y = min_y.min(-y as f32);
            max_x = max_x.max(x as f32);
            max_y = max_y.max(-y as f32);
        }
    }

    let width = (max_x - min_x) * scale + 2.0 * margin;
    let height = (max_y - min_y) * scale + 2.0 * margin;

    let mut data = Data::new();

    for instruction in instructions {
        match *instruction {
            MotionInstruction::MoveTo { x, y } => {
                data = data.move_to((
                    (x as f32 - min_x) * scale + margin,
                    (-y as f32 - min_y) * scale + margin,
                ));
            }
            MotionInstruction::DrawTo { x, y } => {
                data = data.line_to((
                    (x as f32 - min_x) * scale + margin,
                    (-y as f32 - min_y) * scale + margin,
                ));
            }
            MotionInstruction::SetPen { .. } => {}
        }
    }

    (data, (width, height))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = "The quick brown fox jumps over the lazy dog.\n0123456789 !?&@#";
    let height = 6.0;

    let font = scale(&FontTable::builtin()?, height)?;
    let params = LayoutParams::new(height).with_max_line_width(160);
    let instructions = render(text, &font, params).collect::<Result<Vec<_>, _>>()?;

    let (data, (width, height)) = instructions_to_svg_path(&instructions, 4.0, 10.0);

    let path = Path::new()
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", 1)
        .set("d", data);

    let background = Rectangle::new()
        .set("x", 0)
        .set("y", 0)
        .set("width", width)
        .set("height", height)
        .set("fill", "white");

    let document = Document::new()
        .add(background)
        .add(path)
        .set("viewBox", (0, 0, width, height))
        .set("width", format!("{width}px"))
        .set("height", format!("{height}px"));

    svg::save("penwriter_preview.svg", &document)?;
    println!("Wrote penwriter_preview.svg with {} instructions", instructions.len());

    Ok(())
}
