/// Column number (1-based) to letters: 1 → `A`, 27 → `AA`.
pub fn col_to_a1(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push(b'A' + rem);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A1-style address of a 1-based `(row, col)`.
pub fn cell_address(row: u32, col: u32) -> String {
    format!("{}{}", col_to_a1(col), row)
}
