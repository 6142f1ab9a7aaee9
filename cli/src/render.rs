use boardrace::core::location::LocationMark;
use boardrace::core::race::RaceStatus;
use boardrace::interfaces::view_interface::RaceState;
use std::fmt::Write;

fn mark_symbol(mark: LocationMark) -> &'static str {
    match mark {
        LocationMark::Visited => "x",
        LocationMark::Pending => " ",
        LocationMark::EndLocked => "E",
        LocationMark::EndReachable => "!",
    }
}

/// render_race_state formats the race state as text: one line per location with its mark and
/// distance from the active car, one line per car with its time, followed by a prompt.
pub fn render_race_state(race_state: &RaceState) -> anyhow::Result<String> {
    let snapshot = &race_state.snapshot;
    let mut out = String::new();

    writeln!(&mut out)?;
    writeln!(&mut out, "Location            pos        distance (km)")?;
    for l in snapshot.location_states.iter() {
        writeln!(
            &mut out,
            "[{}] {:<12} ({:4.0}, {:4.0})  {:6.1}",
            mark_symbol(l.mark),
            l.name,
            l.pos.x,
            l.pos.y,
            l.distance_from_active
        )?;
    }

    writeln!(&mut out, "Car   color          time (h)  at  end  boost")?;
    for (car_state, color) in snapshot.car_states.iter().zip(race_state.car_colors.iter()) {
        writeln!(
            &mut out,
            "{:<3}  #{:02x}{:02x}{:02x}  {:12.2}  {:3}  {:3}  {}{}",
            car_state.car_id,
            color.r,
            color.g,
            color.b,
            car_state.time,
            car_state.cur_location,
            car_state.end,
            car_state.boost_charges,
            if car_state.boost_active { " (armed)" } else { "" }
        )?;
    }

    match snapshot.status {
        RaceStatus::Finished => {
            if let Some(winner) = snapshot.winner {
                writeln!(&mut out, "Car #{} WINS!", winner)?;
            }
        }
        _ => {
            let active = &snapshot.car_states[snapshot.active_car];
            writeln!(
                &mut out,
                "Active car {} (end: Location {}) > location id, 'boost' or 'quit'",
                active.car_id, active.end
            )?;
        }
    }

    Ok(out)
}
