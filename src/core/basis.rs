use crate::core::errors::CodecError;
use std::fmt;
use std::str::FromStr;

/// Measurement frame used to encode or read a qubit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Basis {
    /// Z basis, written `+`.
    #[default]
    Rectilinear,
    /// X basis, written `x`.
    Diagonal,
}

impl Basis {
    pub const ALL: [Basis; 2] = [Basis::Rectilinear, Basis::Diagonal];

    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'x',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Basis::Rectilinear),
            'x' => Some(Basis::Diagonal),
            _ => None,
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Per-position basis choices of one party.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct BasisString {
    bases: Vec<Basis>,
}

impl BasisString {
    pub fn new() -> Self {
        Self { bases: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bases: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Basis> {
        self.bases.get(index).copied()
    }

    pub fn push(&mut self, basis: Basis) {
        self.bases.push(basis);
    }

    pub fn as_slice(&self) -> &[Basis] {
        &self.bases
    }

    pub fn iter(&self) -> impl Iterator<Item = Basis> + '_ {
        self.bases.iter().copied()
    }
}

impl From<Vec<Basis>> for BasisString {
    fn from(bases: Vec<Basis>) -> Self {
        Self { bases }
    }
}

impl FromIterator<Basis> for BasisString {
    fn from_iter<I: IntoIterator<Item = Basis>>(iter: I) -> Self {
        Self {
            bases: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BasisString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for basis in &self.bases {
            write!(f, "{basis}")?;
        }
        Ok(())
    }
}

impl FromStr for BasisString {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(index, c)| {
                Basis::from_symbol(c).ok_or(CodecError::InvalidBasisSymbol { index, found: c })
            })
            .collect()
    }
}
