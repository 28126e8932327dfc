pub trait StrExt {
    /// Trims the string and cuts it down to at most `max` characters.
    fn trim_truncate(&self, max: usize) -> String;
}

impl StrExt for str {
    fn trim_truncate(&self, max: usize) -> String {
        self.trim().chars().take(max).collect()
    }
}
