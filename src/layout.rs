//! The static page: controls, plot placeholders, client-side wiring.
//!
//! Rendered once at startup from a template, not per request. The page talks
//! back to the server through exactly two endpoints: `GET /api/manifold` on
//! control changes and `POST /api/seasonality` on hover, with an initial
//! synthetic hover at condition 0.

use crate::artifact::{ALGORITHMS, DEFAULT_ALGORITHM, DEFAULT_DIMENSIONALITY};
use crate::config::Config;

pub fn render_page(cfg: &Config) -> String {
    let mut options = String::new();
    for alg in ALGORITHMS {
        let selected = if alg == DEFAULT_ALGORITHM { " selected" } else { "" };
        options.push_str(&format!(
            "        <option value=\"{alg}\"{selected}>{alg}</option>\n"
        ));
    }

    let mut radios = String::new();
    for dim in ["2D", "3D"] {
        let checked = if dim == DEFAULT_DIMENSIONALITY { " checked" } else { "" };
        radios.push_str(&format!(
            "        <label class=\"dim-choice\"><input type=\"radio\" name=\"dimensionality\" \
             value=\"{dim}\"{checked}> {dim}</label>\n"
        ));
    }

    TEMPLATE
        .replace("__STYLESHEET__", &cfg.stylesheet_url)
        .replace("__ALGORITHM_OPTIONS__", options.trim_end())
        .replace("__DIMENSIONALITY_RADIOS__", radios.trim_end())
}

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Seasonalities of diseases</title>
  <link rel="stylesheet" href="__STYLESHEET__">
  <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
  <style>
    body { margin: 5rem; }
    h2.page-title { font-size: 6.0rem; display: inline; position: relative; bottom: 2rem; left: 4rem; }
    .controls { width: 100%; display: inline-block; padding-left: 4rem; }
    #manifold-algorithm { width: 50rem; }
    .dim-choice { display: inline-block; margin-right: 1rem; }
    .plot-half { display: inline-block; width: 49%; vertical-align: top; }
    .plot-full { display: inline-block; width: 100%; }
  </style>
</head>
<body>
  <div><h2 class="page-title">Seasonalities of diseases</h2></div>

  <div class="controls">
    <p>HOVER over a condition on the embedding graph to see its seasonality.
       SCROLL to zoom in and out the embedding graph.</p>
    <p>HOLD the left mouse button and DRAG to rotate.
       HOLD the right mouse button and DRAG to pan.</p>
    <select id="manifold-algorithm">
__ALGORITHM_OPTIONS__
    </select>
    <div id="dimensionality">
__DIMENSIONALITY_RADIOS__
    </div>
  </div>

  <div class="plot-half"><div id="manifold"></div></div>
  <div class="plot-half"><div id="seasonality"></div></div>
  <div class="plot-full"><div id="legend"></div></div>

  <script>
    const algorithmSelect = document.getElementById('manifold-algorithm');

    function currentDim() {
      return document.querySelector('input[name="dimensionality"]:checked').value;
    }

    async function updateManifold() {
      const params = new URLSearchParams({
        algorithm: algorithmSelect.value,
        dim: currentDim(),
      });
      const resp = await fetch('/api/manifold?' + params);
      const figs = await resp.json();
      await Plotly.react('manifold', figs.manifold.data, figs.manifold.layout);
      await Plotly.react('legend', figs.legend.data, figs.legend.layout);
      wireHover();
    }

    async function updateSeasonality(hoverData) {
      const resp = await fetch('/api/seasonality', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify(hoverData),
      });
      const fig = await resp.json();
      Plotly.react('seasonality', fig.data, fig.layout);
    }

    function wireHover() {
      const manifold = document.getElementById('manifold');
      manifold.removeAllListeners && manifold.removeAllListeners('plotly_hover');
      manifold.on('plotly_hover', (ev) => {
        updateSeasonality({points: ev.points.map(p => ({customdata: p.customdata}))});
      });
    }

    algorithmSelect.addEventListener('change', updateManifold);
    document.querySelectorAll('input[name="dimensionality"]')
      .forEach(r => r.addEventListener('change', updateManifold));

    // Initial render: defaults plus a synthetic hover on condition 0.
    updateManifold().then(() => updateSeasonality({points: [{customdata: 0}]}));
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STYLESHEET;

    fn cfg() -> Config {
        Config {
            host: "127.0.0.1".into(),
            port: 8050,
            artifact_path: "bundle.json".into(),
            stylesheet_url: DEFAULT_STYLESHEET.into(),
            debug: false,
        }
    }

    #[test]
    fn page_lists_all_algorithms_in_order() {
        let page = render_page(&cfg());
        let mut last = 0;
        for alg in ALGORITHMS {
            let pos = page.find(alg).unwrap_or_else(|| panic!("missing {}", alg));
            assert!(pos > last, "{} out of order", alg);
            last = pos;
        }
    }

    #[test]
    fn page_defaults_match_selection_state() {
        let page = render_page(&cfg());
        assert!(page.contains("value=\"Isomap\" selected"));
        assert!(page.contains("value=\"3D\" checked"));
        assert!(!page.contains("value=\"2D\" checked"));
    }

    #[test]
    fn page_carries_controls_and_plot_regions() {
        let page = render_page(&cfg());
        for id in ["manifold-algorithm", "dimensionality", "manifold", "legend", "seasonality"] {
            assert!(page.contains(&format!("id=\"{}\"", id)), "missing #{}", id);
        }
        assert!(page.contains(DEFAULT_STYLESHEET));
        assert!(page.contains("customdata: 0"));
    }
}
