use orrery_shared::HexCoord;

/// Directional display name of a cell relative to the empire origin: west/east
/// on the x axis, north/south on y, `0` on either axis at the origin.
pub fn directional_name(origin: HexCoord, coord: HexCoord) -> String {
    let dx = i64::from(coord.x) - i64::from(origin.x);
    let dy = i64::from(coord.y) - i64::from(origin.y);
    format!("{}/{}", axis_part(dx, 'W', 'E'), axis_part(dy, 'N', 'S'))
}

fn axis_part(delta: i64, negative: char, positive: char) -> String {
    if delta < 0 {
        format!("{negative}{}", -delta)
    } else if delta > 0 {
        format!("{positive}{delta}")
    } else {
        "0".to_string()
    }
}
