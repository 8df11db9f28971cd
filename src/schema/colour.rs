//! Colour validation and theme-dependent paper colours

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, hex_digit1, multispace0, multispace1};
use nom::combinator::{map, opt, value, verify};
use nom::number::complete::double;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use serde::{Deserialize, Serialize};

/// Paper colour for light themes, also the system default
pub const LIGHT_PAPER_COLOUR: &str = "#FFFFFF";

/// Paper colour for dark themes
pub const DARK_PAPER_COLOUR: &str = "#1E1E1E";

/// Device colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Default paper colour appropriate for this theme
    pub fn default_paper_colour(&self) -> &'static str {
        match self {
            Theme::Light => LIGHT_PAPER_COLOUR,
            Theme::Dark => DARK_PAPER_COLOUR,
        }
    }
}

/// System default paper colour, independent of any live session
pub fn system_default_paper_colour() -> String {
    Theme::default().default_paper_colour().to_string()
}

const NAMED_COLOURS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen",
    "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue",
    "tan", "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat",
    "white", "whitesmoke", "yellow", "yellowgreen",
];

/// Whether `input` is a colour value a page background accepts:
/// hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()`,
/// `hsl()`/`hsla()`, or a named CSS colour.
pub fn is_valid_colour(input: &str) -> bool {
    let value = input.trim().to_ascii_lowercase();
    if value.is_empty() {
        return false;
    }
    matches!(colour(&value), Ok(("", ()))) || NAMED_COLOURS.binary_search(&value.as_str()).is_ok()
}

// --- Colour grammar ---

/// A numeric channel value, with or without a percent sign
#[derive(Debug, Clone, Copy)]
enum Component {
    Number(f64),
    Percent(f64),
}

impl Component {
    /// Numbers within `0..=max`, percentages within `0..=100`
    fn within(&self, max: f64) -> bool {
        match *self {
            Component::Number(v) => (0.0..=max).contains(&v),
            Component::Percent(v) => (0.0..=100.0).contains(&v),
        }
    }
}

type Channel = fn(&str) -> IResult<&str, ()>;

fn colour(input: &str) -> IResult<&str, ()> {
    alt((hex_colour, rgb_function, hsl_function)).parse(input)
}

fn hex_colour(input: &str) -> IResult<&str, ()> {
    value(
        (),
        preceded(
            char('#'),
            verify(hex_digit1, |hex: &str| matches!(hex.len(), 3 | 4 | 6 | 8)),
        ),
    )
    .parse(input)
}

fn component(input: &str) -> IResult<&str, Component> {
    map((double, opt(char('%'))), |(v, pct)| match pct {
        Some(_) => Component::Percent(v),
        None => Component::Number(v),
    })
    .parse(input)
}

fn rgb_channel(input: &str) -> IResult<&str, ()> {
    value((), verify(component, |c: &Component| c.within(255.0))).parse(input)
}

fn alpha(input: &str) -> IResult<&str, ()> {
    value((), verify(component, |c: &Component| c.within(1.0))).parse(input)
}

fn hue(input: &str) -> IResult<&str, ()> {
    value((), pair(verify(double, |v: &f64| v.is_finite()), opt(tag("deg")))).parse(input)
}

fn percentage(input: &str) -> IResult<&str, ()> {
    let in_range = |c: &Component| matches!(c, Component::Percent(v) if (0.0..=100.0).contains(v));
    value((), verify(component, in_range)).parse(input)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0).parse(input)
}

fn slash(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char('/'), multispace0).parse(input)
}

/// `a, b, c` with an optional `, alpha`
fn comma_args(input: &str, [first, second, third]: [Channel; 3]) -> IResult<&str, ()> {
    let (input, _) = first(input)?;
    let (input, _) = preceded(comma, second).parse(input)?;
    let (input, _) = preceded(comma, third).parse(input)?;
    let (input, _) = opt(preceded(comma, alpha)).parse(input)?;
    Ok((input, ()))
}

/// `a b c` with an optional `/ alpha`
fn space_args(input: &str, [first, second, third]: [Channel; 3]) -> IResult<&str, ()> {
    let (input, _) = first(input)?;
    let (input, _) = preceded(multispace1, second).parse(input)?;
    let (input, _) = preceded(multispace1, third).parse(input)?;
    let (input, _) = opt(preceded(slash, alpha)).parse(input)?;
    Ok((input, ()))
}

const RGB_CHANNELS: [Channel; 3] = [rgb_channel, rgb_channel, rgb_channel];
const HSL_CHANNELS: [Channel; 3] = [hue, percentage, percentage];

fn rgb_comma_args(input: &str) -> IResult<&str, ()> {
    comma_args(input, RGB_CHANNELS)
}

fn rgb_space_args(input: &str) -> IResult<&str, ()> {
    space_args(input, RGB_CHANNELS)
}

fn hsl_comma_args(input: &str) -> IResult<&str, ()> {
    comma_args(input, HSL_CHANNELS)
}

fn hsl_space_args(input: &str) -> IResult<&str, ()> {
    space_args(input, HSL_CHANNELS)
}

fn rgb_function(input: &str) -> IResult<&str, ()> {
    value(
        (),
        (
            alt((tag("rgba"), tag("rgb"))),
            char('('),
            delimited(multispace0, alt((rgb_comma_args, rgb_space_args)), multispace0),
            char(')'),
        ),
    )
    .parse(input)
}

fn hsl_function(input: &str) -> IResult<&str, ()> {
    value(
        (),
        (
            alt((tag("hsla"), tag("hsl"))),
            char('('),
            delimited(multispace0, alt((hsl_comma_args, hsl_space_args)), multispace0),
            char(')'),
        ),
    )
    .parse(input)
}
