/// Passthrough flags forwarded to `amass enum`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AmassOptions {
    pub verbose: bool,
    pub brute: bool,
    pub active: bool,
    pub passive: bool,
    pub alteration_wordlist: Option<String>,
    pub ports: Option<String>,
    pub ip: bool,
    pub ipv4: bool,
    pub ipv6: bool,
}

impl AmassOptions {
    /// Flag tokens in the order amass receives them. Values are separate tokens.
    ///
    /// `-active` together with `-passive` is forwarded as is, amass decides what it means.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        if self.verbose {
            tokens.push("-v".to_string());
        }
        if self.brute {
            tokens.push("-brute".to_string());
        }
        if self.active {
            tokens.push("-active".to_string());
        }
        if self.passive {
            tokens.push("-passive".to_string());
        }
        if let Some(wordlist) = non_empty(&self.alteration_wordlist) {
            tokens.push("-aw".to_string());
            tokens.push(wordlist.to_string());
        }
        if let Some(ports) = non_empty(&self.ports) {
            tokens.push("-p".to_string());
            tokens.push(ports.to_string());
        }
        if self.ip {
            tokens.push("-ip".to_string());
        }
        if self.ipv4 {
            tokens.push("-ipv4".to_string());
        }
        if self.ipv6 {
            tokens.push("-ipv6".to_string());
        }
        tokens
    }

    pub fn to_options_string(&self) -> String {
        self.tokens().join(" ")
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
