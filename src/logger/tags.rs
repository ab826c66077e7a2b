/// Log tags identify which subsystem produced a message
///
/// Each tag maps to a `--debug-<key>` flag that enables its debug output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Rpc,
    Escrow,
    Holders,
    Scanner,
    Webserver,
}

impl LogTag {
    /// Key used in `--debug-<key>` and `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Rpc => "rpc".to_string(),
            LogTag::Escrow => "escrow".to_string(),
            LogTag::Holders => "holders".to_string(),
            LogTag::Scanner => "scanner".to_string(),
            LogTag::Webserver => "webserver".to_string(),
        }
    }

    /// Uppercase label without color codes, used in the file sink
    pub fn to_plain_string(&self) -> String {
        self.to_debug_key().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_keys() {
        assert_eq!(LogTag::Holders.to_debug_key(), "holders");
        assert_eq!(LogTag::Webserver.to_plain_string(), "WEBSERVER");
    }
}
