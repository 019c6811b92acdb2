//! Regenbogen-Farbe für die k-te von n Besuchsstufen (rot → … → rot).

/// Farbcode `#rrggbb` für Stufe `k` von `n`.
///
/// `k / n` wird als Farbton auf dem HSV-Farbkreis (volle Sättigung und Helligkeit)
/// interpretiert, jeder Kanal mit 255 skaliert und abgeschnitten.
///
/// # Panics
/// Bei `n == 0`.
pub fn shade_given_time(k: u32, n: u32) -> String {
    assert!(n > 0, "shade_given_time: Gesamtzahl der Stufen muss > 0 sein");

    let (r, g, b) = hsv_to_rgb(k as f64 / n as f64, 1.0, 1.0);
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Multipliziert mit 255 (nicht 256), damit 1.0 auf 0xff fällt
fn channel(value: f64) -> u8 {
    (value * 255.0) as u8
}

/// HSV → RGB, alle Werte in [0, 1]; Farbtöne ausserhalb wickeln um
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}
