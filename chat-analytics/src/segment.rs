//! Text segmentation: splits long text into pieces that fit one transport message.
//!
//! Lengths are counted in characters, not bytes.

/// Telegram's hard limit for one outbound text message.
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

/// Splits `text` into ordered segments of at most `max_len` characters.
///
/// Text that already fits is returned unchanged as the only segment. Otherwise lines are
/// packed greedily (see [`pack`]); segments are trimmed at split points and a line longer
/// than `max_len` is cut into `max_len`-sized slices.
pub fn segment(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    if char_len(text) <= max_len {
        return vec![text.to_string()];
    }
    pack(text.split('\n'), max_len)
}

/// Greedy packer shared by output segmentation and transcript chunking.
///
/// Units are joined with `\n`; a unit is appended while `current + unit + 1 <= max_len`.
/// On overflow the pending segment is closed (trimmed, dropped if blank) and the unit
/// starts the next one. Units longer than `max_len` flush the pending segment and are
/// hard-split. Order is preserved and no non-blank content is dropped.
pub fn pack<I, S>(units: I, max_len: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut packer = Packer::new(max_len.max(1));
    for unit in units {
        packer.push(unit.as_ref());
    }
    packer.finish()
}

struct Packer {
    max_len: usize,
    segments: Vec<String>,
    current: String,
    current_len: usize,
}

impl Packer {
    fn new(max_len: usize) -> Self {
        Self {
            max_len,
            segments: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    fn push(&mut self, unit: &str) {
        let unit_len = char_len(unit);

        if self.current_len + unit_len + 1 <= self.max_len {
            self.append(unit, unit_len);
            return;
        }

        self.flush();

        if unit_len > self.max_len {
            self.segments.extend(hard_split(unit, self.max_len));
        } else {
            self.append(unit, unit_len);
        }
    }

    fn append(&mut self, unit: &str, unit_len: usize) {
        self.current.push_str(unit);
        self.current.push('\n');
        self.current_len += unit_len + 1;
    }

    fn flush(&mut self) {
        let trimmed = self.current.trim();
        if !trimmed.is_empty() {
            self.segments.push(trimmed.to_string());
        }
        self.current.clear();
        self.current_len = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.segments
    }
}

fn hard_split(line: &str, max_len: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(max_len)
        .map(|slice| slice.iter().collect())
        .collect()
}

pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}
