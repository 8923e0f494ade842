/// Begin/end markers for runs of consecutive sprites sharing one matte key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatteFlags {
    pub begin: Vec<bool>,
    pub end: Vec<bool>,
}

impl MatteFlags {
    /// Compute flags from per-sprite matte keys. Empty keys count as absent.
    pub fn from_keys(keys: &[Option<&str>]) -> Self {
        let key = |i: usize| keys[i].filter(|k| !k.is_empty());
        let n = keys.len();
        let mut begin = vec![false; n];
        let mut end = vec![false; n];

        for i in 0..n {
            let Some(k) = key(i) else {
                continue;
            };
            begin[i] = i == 0 || key(i - 1) != Some(k);
            end[i] = i + 1 == n || key(i + 1) != Some(k);
        }

        Self { begin, end }
    }

    pub fn len(&self) -> usize {
        self.begin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.begin.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/matte.rs"]
mod tests;
