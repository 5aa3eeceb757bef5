//! A1-style cell addresses.

use std::{fmt, str::FromStr};

/// Zero-based cell position, written and parsed in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// The cell `offset` columns to the right.
    pub fn right(self, offset: u16) -> Self {
        Self::new(self.row, self.col + offset)
    }

    /// The cell `offset` rows below.
    pub fn below(self, offset: u32) -> Self {
        Self::new(self.row + offset, self.col)
    }
}

fn column_name(col: u16) -> String {
    let mut n = u32::from(col) + 1;
    let mut name = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        name.push(b'A' + rem);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8_lossy(&name).into_owned()
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name(self.col), self.row + 1)
    }
}

impl FromStr for CellRef {
    type Err = String;

    /// ```rust
    /// use stitch_core::worksheet::CellRef;
    ///
    /// assert_eq!("B3".parse::<CellRef>(), Ok(CellRef::new(2, 1)));
    /// assert_eq!("aa10".parse::<CellRef>(), Ok(CellRef::new(9, 26)));
    /// assert!("3B".parse::<CellRef>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| format!("Invalid cell reference: {s}"))?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("Invalid cell reference: {s}"));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > u32::from(u16::MAX) {
                return Err(format!("Column out of range: {s}"));
            }
        }
        let row: u32 = digits
            .parse()
            .map_err(|_| format!("Invalid cell reference: {s}"))?;
        if row == 0 {
            return Err(format!("Rows start at 1: {s}"));
        }

        Ok(CellRef::new(row - 1, (col - 1) as u16))
    }
}
