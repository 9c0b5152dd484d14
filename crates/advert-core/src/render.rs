//! Template substitution for outgoing advert messages.
//!
//! Messages may contain placeholder tags (`{MAP}`, `{PL}`, ...) and color tags
//! (`{GREEN}`, ...). Rendering is a single left-to-right scan over the raw
//! message: substituted values are never re-scanned, so a server name that
//! happens to contain `{PL}` is emitted literally.
//!
//! Literal newlines are always turned into U+2029 because the chat channel
//! cannot display raw line breaks.

use std::borrow::Cow;

use chrono::{Local, NaiveDateTime};

use crate::config::AdvertConfig;
use crate::ports::{HOSTNAME_CVAR, HOSTPORT_CVAR, HostPorts};

/// Replacement for literal newlines.
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Server name used when the `hostname` console variable is unset.
pub const UNKNOWN_SERVER_NAME: &str = "Unknown";

/// Engine chat color control codes, keyed by tag name (without braces).
pub const COLOR_TAGS: [(&str, &str); 21] = [
    ("DEFAULT", "\x01"),
    ("WHITE", "\x01"),
    ("DARKRED", "\x02"),
    ("GREEN", "\x04"),
    ("LIGHTYELLOW", "\x09"),
    ("LIGHTBLUE", "\x0B"),
    ("OLIVE", "\x05"),
    ("LIME", "\x06"),
    ("RED", "\x07"),
    ("LIGHTPURPLE", "\x03"),
    ("PURPLE", "\x0E"),
    ("GREY", "\x08"),
    ("YELLOW", "\x09"),
    ("GOLD", "\x10"),
    ("SILVER", "\x0A"),
    ("BLUE", "\x0B"),
    ("DARKBLUE", "\x0C"),
    ("BLUEGREY", "\x0A"),
    ("MAGENTA", "\x0E"),
    ("LIGHTRED", "\x0F"),
    ("ORANGE", "\x10"),
];

/// Read-only runtime facts a template can reference.
///
/// Every method is only called when the matching tag is present.
pub trait TemplateContext {
    fn server_ip(&self) -> String;

    /// Host port, `0` when unknown.
    fn host_port(&self) -> i64;

    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;

    fn player_count(&self) -> usize;

    /// Canonical id of the current map.
    fn map_name(&self) -> String;

    /// Server name, [`UNKNOWN_SERVER_NAME`] when unset.
    fn server_name(&self) -> String;
}

/// Template context backed by the live host ports.
pub struct HostContext<'a> {
    ports: &'a HostPorts,
}

impl<'a> HostContext<'a> {
    pub const fn new(ports: &'a HostPorts) -> Self {
        Self { ports }
    }
}

impl TemplateContext for HostContext<'_> {
    fn server_ip(&self) -> String {
        self.ports.engine.server_ip()
    }

    fn host_port(&self) -> i64 {
        self.ports.console.find_int(HOSTPORT_CVAR).unwrap_or(0)
    }

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn player_count(&self) -> usize {
        self.ports.players.player_count()
    }

    fn map_name(&self) -> String {
        self.ports.engine.map_name()
    }

    fn server_name(&self) -> String {
        self.ports
            .console
            .find_string(HOSTNAME_CVAR)
            .unwrap_or_else(|| UNKNOWN_SERVER_NAME.to_string())
    }
}

/// Fixed template context for previews and tests.
#[derive(Debug, Clone)]
pub struct StaticContext {
    pub server_ip: String,
    pub host_port: i64,
    pub now: NaiveDateTime,
    pub player_count: usize,
    pub map_name: String,
    pub server_name: Option<String>,
}

impl Default for StaticContext {
    fn default() -> Self {
        Self {
            server_ip: "127.0.0.1".to_string(),
            host_port: 0,
            now: Local::now().naive_local(),
            player_count: 0,
            map_name: String::new(),
            server_name: None,
        }
    }
}

impl TemplateContext for StaticContext {
    fn server_ip(&self) -> String {
        self.server_ip.clone()
    }

    fn host_port(&self) -> i64 {
        self.host_port
    }

    fn now(&self) -> NaiveDateTime {
        self.now
    }

    fn player_count(&self) -> usize {
        self.player_count
    }

    fn map_name(&self) -> String {
        self.map_name.clone()
    }

    fn server_name(&self) -> String {
        self.server_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_SERVER_NAME.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Ip,
    Port,
    Date,
    Time,
    Players,
    Map,
    ServerName,
    Color(&'static str),
}

impl Tag {
    fn parse(name: &str) -> Option<Self> {
        let tag = match name {
            "IP" => Self::Ip,
            "PORT" => Self::Port,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "PL" => Self::Players,
            "MAP" => Self::Map,
            "SERVERNAME" => Self::ServerName,
            _ => {
                let (_, code) = COLOR_TAGS.iter().find(|(color, _)| *color == name)?;
                Self::Color(*code)
            }
        };
        Some(tag)
    }
}

/// Values resolved at most once per render.
struct Resolver<'a> {
    config: &'a AdvertConfig,
    ctx: &'a dyn TemplateContext,
    now: Option<NaiveDateTime>,
    map: Option<String>,
    server_name: Option<String>,
}

impl<'a> Resolver<'a> {
    fn new(config: &'a AdvertConfig, ctx: &'a dyn TemplateContext) -> Self {
        Self {
            config,
            ctx,
            now: None,
            map: None,
            server_name: None,
        }
    }

    fn now(&mut self) -> NaiveDateTime {
        let ctx = self.ctx;
        *self.now.get_or_insert_with(|| ctx.now())
    }

    fn push(&mut self, tag: Tag, out: &mut String) {
        match tag {
            Tag::Ip => out.push_str(&self.ctx.server_ip()),
            Tag::Port => out.push_str(&self.ctx.host_port().to_string()),
            Tag::Date => out.push_str(&self.now().format("%d-%m-%Y").to_string()),
            Tag::Time => out.push_str(&self.now().format("%H:%M:%S").to_string()),
            Tag::Players => out.push_str(&self.ctx.player_count().to_string()),
            Tag::Map => {
                let (config, ctx) = (self.config, self.ctx);
                let map = self.map.get_or_insert_with(|| {
                    let id = ctx.map_name();
                    config.map_display_name(&id).to_string()
                });
                out.push_str(map);
            }
            Tag::ServerName => {
                let ctx = self.ctx;
                out.push_str(self.server_name.get_or_insert_with(|| ctx.server_name()));
            }
            Tag::Color(code) => out.push_str(code),
        }
    }
}

/// Render a raw advert message.
///
/// Messages without `{` or newlines are returned borrowed and unchanged.
/// Unknown `{...}` sequences are kept verbatim.
pub fn render<'a>(raw: &'a str, config: &AdvertConfig, ctx: &dyn TemplateContext) -> Cow<'a, str> {
    if !raw.contains(['{', '\n']) {
        return Cow::Borrowed(raw);
    }

    let mut resolver = Resolver::new(config, ctx);
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find(['{', '\n']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix('\n') {
            out.push(PARAGRAPH_SEPARATOR);
            rest = after;
            continue;
        }

        let body = &tail[1..];
        if let Some((tag, end)) = body
            .find('}')
            .and_then(|end| Tag::parse(&body[..end]).map(|tag| (tag, end)))
        {
            resolver.push(tag, &mut out);
            rest = &body[end + 1..];
        } else {
            out.push('{');
            rest = body;
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}
