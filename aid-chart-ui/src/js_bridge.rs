//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The uPlot shim is split across `assets/js/*.js` and loaded at runtime.
//! The scripts are evaluated as globals (no ES modules) once uPlot itself is
//! available, and expose their entry points via `window.*`. This module
//! serializes options and data and calls those globals.

static PLOT_COMMON_JS: &str = include_str!("../assets/js/plot-common.js");
static CIRCLES_PLOT_JS: &str = include_str!("../assets/js/circles-plot.js");
static LINE_PLOT_JS: &str = include_str!("../assets/js/line-plot.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('[AID] JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a string as a JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Initialize the chart shim with a wait-for-uPlot polling loop.
///
/// The shim files define functions like `renderAidLine(...)` via `function`
/// declarations. They are evaluated at global scope via an indirect `eval()`
/// once uPlot is ready, and each entry point is promoted to `window.*`.
/// Calling this more than once is harmless.
pub fn init_charts() {
    let all_js = [PLOT_COMMON_JS, CIRCLES_PLOT_JS, LINE_PLOT_JS].join("\n");

    let store_js = format!(
        "if (!window.__aidChartsReady) window.__aidChartScripts = {};",
        js_string(&all_js)
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            if (window.__aidChartsReady || window.__aidChartsWaiting) return;
            window.__aidChartsWaiting = true;
            var waitForUPlot = setInterval(function() {
                if (typeof uPlot !== 'undefined') {
                    clearInterval(waitForUPlot);
                    (0, eval)(window.__aidChartScripts);
                    delete window.__aidChartScripts;
                    if (typeof renderAidCircles !== 'undefined') window.renderAidCircles = renderAidCircles;
                    if (typeof renderAidLine !== 'undefined') window.renderAidLine = renderAidLine;
                    if (typeof destroyAidPlot !== 'undefined') window.destroyAidPlot = destroyAidPlot;
                    window.__aidChartsReady = true;
                    console.log('[AID] charts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Poll until the shim, `render_fn` and the container all exist, then call
/// `render_fn(container_id, data_json, options_json)`.
fn render_when_ready(render_fn: &str, container_id: &str, data_json: &str, options_json: &str) {
    let id = js_string(container_id);
    let data = js_string(data_json);
    let options = js_string(options_json);
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__aidChartsReady &&
                    typeof window.{render_fn} !== 'undefined' &&
                    document.getElementById({id})) {{
                    clearInterval(poll);
                    try {{
                        window.{render_fn}({id}, {data}, {options});
                    }} catch(e) {{ console.error('[AID] {render_fn} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Render the ring-of-stations scatter plot (faceted data).
///
/// Interactive plots expect the circles hooks to be installed first, see
/// [`crate::hooks::install_circles`].
pub fn render_circles_plot(container_id: &str, data_json: &str, options_json: &str) {
    render_when_ready("renderAidCircles", container_id, data_json, options_json);
}

/// Render an aligned line plot (solar wind).
pub fn render_line_plot(container_id: &str, data_json: &str, options_json: &str) {
    render_when_ready("renderAidLine", container_id, data_json, options_json);
}

/// Destroy the plot in the given container, if any.
pub fn destroy_chart(container_id: &str) {
    let id = js_string(container_id);
    call_js(&format!(
        "if (window.destroyAidPlot) {{ window.destroyAidPlot({id}); }} \
         else {{ var el = document.getElementById({id}); if (el) el.innerHTML = ''; }}"
    ));
}
