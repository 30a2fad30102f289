/*
 * Output Module
 *
 * Writers for the recorded state history. The core simulation only ever
 * hands out SpaceState snapshots; turning them into files for offline
 * visualization lives here, at the edge of the crate.
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::space::SpaceState;

/// Writes the state sequence as extended-XYZ frames (one per state), the
/// format OVITO and most trajectory viewers accept. Each row carries the
/// particle position plus its heading as a property column.
pub fn write_xyz<W: Write>(states: &[SpaceState], writer: &mut W) -> io::Result<()> {
    for (step, state) in states.iter().enumerate() {
        writeln!(writer, "{}", state.particles.len())?;
        writeln!(
            writer,
            "Lattice=\"{l} 0.0 0.0 0.0 {l} 0.0 0.0 0.0 1.0\" \
             Properties=pos:R:2:theta:R:1 step={step}",
            l = state.side_length,
        )?;
        for p in &state.particles {
            writeln!(writer, "{} {} {}", p.x, p.y, p.theta)?;
        }
    }
    Ok(())
}

pub fn write_xyz_file<P: AsRef<Path>>(states: &[SpaceState], path: P) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_xyz(states, &mut writer)?;
    writer.flush()
}

/// Writes the state sequence as a single JSON array.
pub fn write_json_file<P: AsRef<Path>>(states: &[SpaceState], path: P) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, states)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::Particle;
    use crate::space::Space;

    fn one_state() -> SpaceState {
        Space::new(
            10.0,
            vec![
                Particle::new(1.0, 2.0, 0.5, 0.03),
                Particle::new(3.0, 4.0, 1.5, 0.03),
            ],
        )
        .unwrap()
        .save_state()
    }

    #[test]
    fn xyz_frames_carry_the_count_header_and_one_row_per_particle() {
        let states = vec![one_state(), one_state()];
        let mut buffer = Vec::new();
        write_xyz(&states, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // Two frames of (count, comment, 2 rows)
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "2");
        assert!(lines[1].contains("step=0"));
        assert!(lines[2].starts_with("1 2 "));
        assert!(lines[5].contains("step=1"));
    }

    #[test]
    fn json_output_serializes_the_full_snapshot() {
        let states = vec![one_state()];
        let text = serde_json::to_string(&states).unwrap();
        assert!(text.contains("\"side_length\":10.0"));
        assert!(text.contains("\"theta\":0.5"));
    }
}
