// Plotly color sequences used by the chart profiles
use crate::domain::chart::Palette;

const INFERNO: &[&str] = &[
    "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925", "#fb9b06",
    "#f7d13d", "#fcffa4",
];

const BOLD: &[&str] = &[
    "rgb(127, 60, 141)", "rgb(17, 165, 121)", "rgb(57, 105, 172)", "rgb(242, 183, 1)",
    "rgb(231, 63, 116)", "rgb(128, 186, 90)", "rgb(230, 131, 16)", "rgb(0, 134, 149)",
    "rgb(207, 28, 144)", "rgb(249, 123, 114)", "rgb(165, 170, 153)",
];

const SET1: &[&str] = &[
    "rgb(228,26,28)", "rgb(55,126,184)", "rgb(77,175,74)", "rgb(152,78,163)", "rgb(255,127,0)",
    "rgb(255,255,51)", "rgb(166,86,40)", "rgb(247,129,191)", "rgb(153,153,153)",
];

const VIRIDIS: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

const DARK24: &[&str] = &[
    "#2E91E5", "#E15F99", "#1CA71C", "#FB0D0D", "#DA16E3", "#222A2A", "#B68100", "#750D86",
    "#EB663B", "#511CFB", "#00A08B", "#FB00D1", "#FC0080", "#B2828D", "#6C7C32", "#778AAE",
    "#862A16", "#A777F1", "#620042", "#1616A7", "#DA60CA", "#6C4516", "#0D2A63", "#AF0038",
];

const SET3: &[&str] = &[
    "rgb(141,211,199)", "rgb(255,255,179)", "rgb(190,186,218)", "rgb(251,128,114)",
    "rgb(128,177,211)", "rgb(253,180,98)", "rgb(179,222,105)", "rgb(252,205,229)",
    "rgb(217,217,217)", "rgb(188,128,189)", "rgb(204,235,197)", "rgb(255,237,111)",
];

pub fn colors(palette: Palette) -> &'static [&'static str] {
    match palette {
        Palette::Inferno => INFERNO,
        Palette::Bold => BOLD,
        Palette::Set1 => SET1,
        Palette::Viridis => VIRIDIS,
        Palette::Dark24 => DARK24,
        Palette::Set3 => SET3,
    }
}

/// Color for the n-th series, cycling through the palette.
pub fn nth_color(palette: Palette, n: usize) -> &'static str {
    let colors = colors(palette);
    colors[n % colors.len()]
}

/// Evenly spaced `[position, color]` stops for a continuous color scale.
pub fn color_scale(palette: Palette) -> Vec<(f64, &'static str)> {
    let colors = colors(palette);
    let last = (colors.len() - 1).max(1) as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, c)| (i as f64 / last, *c))
        .collect()
}
