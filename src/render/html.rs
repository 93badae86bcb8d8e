use crate::config::Settings;
use crate::generator::SchemaDocument;
use crate::render::swagger::render_swagger;

/// Render a self-contained Swagger UI page (document embedded as JSON).
///
/// Important: we avoid `format!()` because the page contains many `{}` from
/// JS object literals, which would conflict with Rust formatting.
pub fn render_swagger_ui(doc: &SchemaDocument, settings: &Settings) -> anyhow::Result<String> {
    let spec = embed_json(&serde_json::to_string(&render_swagger(doc, settings))?);
    let ui_settings = embed_json(&serde_json::to_string(&settings.ui_settings())?);

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
<style>
  body { margin: 0; font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; }
  header { display: flex; justify-content: flex-end; gap: 12px; padding: 8px 16px; border-bottom: 1px solid #ddd; font-size: 14px; }
  header a { color: #3b4151; }
</style>
</head>
<body>
<header id="session"></header>
<div id="swagger-ui"></div>

<script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
// Embedded Swagger document and UI settings (JSON object literals)
const SPEC = __SPEC__;
const SETTINGS = __SETTINGS__;
const USE_SESSION_AUTH = __USE_SESSION_AUTH__;
const LOGIN_URL = "__LOGIN_URL__";
const LOGOUT_URL = "__LOGOUT_URL__";

function renderSession() {
  const el = document.getElementById("session");
  if (!USE_SESSION_AUTH) {
    el.style.display = "none";
    return;
  }
  const next = encodeURIComponent(window.location.pathname);
  el.innerHTML = `
    <a href="${LOGIN_URL}?next=${next}">Session Login</a>
    <a href="${LOGOUT_URL}?next=${next}">Session Logout</a>
  `;
}

const options = {
  spec: SPEC,
  dom_id: "#swagger-ui",
  deepLinking: true,
  supportedSubmitMethods: SETTINGS.supportedSubmitMethods,
  validatorUrl: SETTINGS.validatorUrl || null,
  showCommonExtensions: SETTINGS.showRequestHeaders,
};
if (SETTINGS.docExpansion) options.docExpansion = SETTINGS.docExpansion;
if (SETTINGS.operationsSorter) options.operationsSorter = SETTINGS.operationsSorter;
if (SETTINGS.apisSorter) options.tagsSorter = SETTINGS.apisSorter;

renderSession();
window.ui = SwaggerUIBundle(options);
</script>
</body>
</html>
"##;

    Ok(TEMPLATE
        .replace("__TITLE__", &escape_html(&doc.title))
        .replace("__USE_SESSION_AUTH__", if settings.use_session_auth { "true" } else { "false" })
        .replace("__LOGIN_URL__", &escape_js_string(&settings.login_url))
        .replace("__LOGOUT_URL__", &escape_js_string(&settings.logout_url))
        .replace("__SETTINGS__", &ui_settings)
        .replace("__SPEC__", &spec))
}

/// JSON is valid JS, but `</script>` inside a string would end the block.
fn embed_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape_js_string(s: &str) -> String {
    embed_json(&s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
