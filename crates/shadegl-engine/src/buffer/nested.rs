/// Nested numeric data as supplied by callers: groups of groups of numbers.
///
/// The shape is kept for inspection; [`Nested::flatten`] produces the sequence
/// that is actually uploaded.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Scalar(f64),
    Group(Vec<Nested>),
}

impl Nested {
    /// An empty group.
    #[inline]
    pub const fn empty() -> Self {
        Nested::Group(Vec::new())
    }

    /// All scalars in depth-first order, regardless of nesting depth.
    pub fn flatten(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.len());
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Vec<f64>) {
        match self {
            Nested::Scalar(v) => out.push(*v),
            Nested::Group(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// Number of scalars contained at any depth.
    pub fn len(&self) -> usize {
        match self {
            Nested::Scalar(_) => 1,
            Nested::Group(items) => items.iter().map(Nested::len).sum(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest nesting level; a scalar has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Nested::Scalar(_) => 0,
            Nested::Group(items) => 1 + items.iter().map(Nested::depth).max().unwrap_or(0),
        }
    }
}

macro_rules! scalar_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Nested {
                #[inline]
                fn from(v: $t) -> Self {
                    Nested::Scalar(v as f64)
                }
            }
        )*
    };
}

scalar_from!(f64, f32, i32, u32, i16, u16, u8);

impl<T: Into<Nested>> From<Vec<T>> for Nested {
    fn from(items: Vec<T>) -> Self {
        Nested::Group(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Nested>, const N: usize> From<[T; N]> for Nested {
    fn from(items: [T; N]) -> Self {
        Nested::Group(items.into_iter().map(Into::into).collect())
    }
}
