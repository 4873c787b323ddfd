macro_rules! make_index {
    ($(#[$attr:meta])* $vis:vis $name:ident) => {
        $(#[$attr])*
        #[derive(
            Copy,
            Clone,
            Debug,
            Hash,
            Eq,
            PartialEq,
            Ord,
            PartialOrd,
        )]
        $vis struct $name(u32);

        impl $name {
            /// Create new index from `usize`.
            #[inline(always)]
            pub fn new(x: usize) -> Self {
                debug_assert!(x < u32::MAX as usize);
                Self(x as u32)
            }

            /// Returns the index as `usize`.
            #[inline(always)]
            pub fn index(&self) -> usize { self.0 as usize }

            /// Iterate over the indices `0..n`.
            #[inline]
            pub fn range(n: usize) -> impl Iterator<Item = Self> + Clone {
                (0..n).map(Self::new)
            }
        }

        impl ::std::convert::From<usize> for $name {
            #[inline(always)]
            fn from(x: usize) -> Self {
                Self::new(x)
            }
        }

        impl ::std::convert::From<$name> for usize {
            #[inline(always)]
            fn from(x: $name) -> Self {
                x.index()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

make_index!(
    /// A vertex of the input [Graph](crate::Graph).
    pub NodeIndex
);

make_index!(
    /// A cluster label of a [Clustering](crate::Clustering).
    ///
    /// Labels are reused after their cluster becomes empty. They are not tied to
    /// node indices, even though a singleton clustering starts with equal values.
    pub ClusterIndex
);

#[cfg(test)]
mod test {
    #[test]
    fn make_index() {
        make_index!(TestIndex);

        let idx = TestIndex::new(42);

        assert_eq!(idx.index(), 42);
        assert_eq!(TestIndex::from(42_usize), idx);
        assert_eq!(usize::from(idx), 42_usize);
        assert_eq!(format!("{:?}", idx), "TestIndex(42)".to_string());
        assert_eq!(format!("{}", idx), "42".to_string());
    }

    #[test]
    fn range() {
        make_index!(TestIndex);

        let indices: Vec<_> = TestIndex::range(3).collect();
        assert_eq!(indices, [TestIndex::new(0), TestIndex::new(1), TestIndex::new(2)]);
        assert_eq!(TestIndex::range(0).count(), 0);
    }
}
