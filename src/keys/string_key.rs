use crate::keys::KeySequence;

// Character strings. Elements are Unicode scalar values, so `len` is a char count rather than
// a byte count.
impl KeySequence for String {
    type Element = char;
    type Elements<'a> = std::str::Chars<'a>;

    fn empty() -> Self {
        String::new()
    }

    fn len(&self) -> usize {
        self.chars().count()
    }

    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }

    fn elements(&self) -> Self::Elements<'_> {
        self.chars()
    }

    fn push(&mut self, element: char) {
        String::push(self, element)
    }

    fn concat_key(&self, other: &Self) -> Self {
        let mut joined = String::with_capacity(self.as_str().len() + other.as_str().len());
        joined.push_str(self);
        joined.push_str(other);
        joined
    }

    fn split_key(&self) -> Option<(char, Self)> {
        let mut chars = self.chars();
        let head = chars.next()?;
        Some((head, chars.as_str().to_string()))
    }
}
