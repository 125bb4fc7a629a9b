//! Annotator page rendering
//!
//! Renders the single-page annotation UI: the document in a selectable
//! container, the selection bridge script, label controls, and the current
//! annotation log.
//!
//! The document is HTML-escaped so the container holds it as literal text in
//! a single text node. The bridge's offset arithmetic counts characters from
//! the start of that text node, so the container must hold the document and
//! nothing else: no surrounding whitespace, no markup interpretation.

use html_escape::{encode_safe, encode_text};
use uuid::Uuid;

use crate::session::SessionSnapshot;

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
textarea { width: 100%; box-sizing: border-box; }
#text-container { border: 1px solid #ccc; padding: 10px; border-radius: 5px; white-space: pre-wrap; min-height: 4rem; }
#status { font-weight: bold; }
";

/// Browser half of the selection bridge plus the page's form wiring.
///
/// On mouseup over the text container it measures the selection range
/// against the container's text content and reports
/// `(selected_text, start, end)` to the callback endpoint, fire-and-forget.
/// Every other control round-trips through the JSON API and reloads.
const SCRIPT: &str = r#"<script>
const SESSION = "__SESSION_ID__";
const API = `/api/v1/sessions/${SESSION}`;
const statusLine = document.getElementById("status");

function report(message) {
    statusLine.textContent = message;
}

async function call(path, options) {
    const response = await fetch(API + path, options);
    if (!response.ok) {
        const body = await response.json().catch(() => null);
        throw new Error(body && body.message ? body.message : response.statusText);
    }
    return response;
}

const textContainer = document.getElementById("text-container");
textContainer.addEventListener("mouseup", () => {
    const selection = window.getSelection();
    const selectedText = selection.toString();
    if (selectedText.length === 0) {
        return;
    }
    const range = selection.getRangeAt(0);
    const preSelectionRange = range.cloneRange();
    preSelectionRange.selectNodeContents(textContainer);
    preSelectionRange.setEnd(range.startContainer, range.startOffset);
    const start = preSelectionRange.toString().length;
    const end = start + range.toString().length;
    const query = `selected_text=${encodeURIComponent(selectedText)}&start=${start}&end=${end}`;
    fetch(`${API}/selection/callback?${query}`)
        .then(() => window.location.reload())
        .catch(() => {});
});

document.getElementById("set-document").addEventListener("click", () => {
    const text = document.getElementById("document-input").value;
    call("/document", {
        method: "PUT",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ text }),
    }).then(() => window.location.reload()).catch(e => report(e.message));
});

document.getElementById("confirm").addEventListener("click", () => {
    const label = document.getElementById("label-select").value;
    call("/annotations", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ label }),
    }).then(() => window.location.reload()).catch(e => report(e.message));
});

document.getElementById("add-label").addEventListener("click", () => {
    const name = document.getElementById("new-label").value;
    call("/labels", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ name }),
    }).then(() => window.location.reload()).catch(e => report(e.message));
});

document.getElementById("save").addEventListener("click", () => {
    call("/annotations/save", { method: "POST" })
        .then(async response => {
            const body = await response.json();
            report(`Saved ${body.saved} annotations to ${body.path}`);
        })
        .catch(e => report(e.message));
});
</script>"#;

/// Render the annotator page for one session.
pub fn render_page(session_id: Uuid, snapshot: &SessionSnapshot) -> String {
    let document = encode_text(&snapshot.document);

    let label_options: String = snapshot
        .labels
        .iter()
        .map(|label| {
            format!(
                "<option value=\"{}\">{}</option>",
                encode_safe(label),
                encode_text(label)
            )
        })
        .collect();

    let pending_block = match &snapshot.pending {
        Some(p) => format!(
            "<p><strong>Selected Text:</strong> {}</p>\n\
             <p><strong>Start Position:</strong> {}</p>\n\
             <p><strong>End Position:</strong> {}</p>",
            encode_text(&p.text),
            p.start,
            p.end
        ),
        None => "<p>Select a portion of the text below to annotate it.</p>".to_string(),
    };

    let annotation_rows: String = snapshot
        .annotations
        .iter()
        .map(|a| {
            format!(
                "<li>{} --&gt; {} [{}, {}]</li>",
                encode_text(&a.text),
                encode_text(&a.label),
                a.start,
                a.end
            )
        })
        .collect();

    let script = SCRIPT.replace("__SESSION_ID__", &session_id.to_string());

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>NER Annotation Tool</title>\n\
         <style>\n{style}</style>\n\
         </head>\n\
         <body>\n\
         <h1>NER Annotation Tool</h1>\n\
         <p>Select text and assign named entities.</p>\n\
         <section>\n\
         <h2>Document</h2>\n\
         <textarea id=\"document-input\" rows=\"8\" placeholder=\"Enter text for annotation\">{document}</textarea>\n\
         <button id=\"set-document\">Load Document</button>\n\
         </section>\n\
         <section>\n\
         <h2>Annotate Entities</h2>\n\
         {pending_block}\n\
         <div id=\"text-container\">{document}</div>\n\
         <p>\n\
         <label for=\"label-select\">Entity type:</label>\n\
         <select id=\"label-select\">{label_options}</select>\n\
         <button id=\"confirm\">Save Annotation</button>\n\
         </p>\n\
         <p>\n\
         <input id=\"new-label\" placeholder=\"New entity type\">\n\
         <button id=\"add-label\">Add Entity Type</button>\n\
         </p>\n\
         </section>\n\
         <section>\n\
         <h2>Current Annotations</h2>\n\
         <ol id=\"annotations\">{annotation_rows}</ol>\n\
         <button id=\"save\">Save Annotations</button>\n\
         </section>\n\
         <p id=\"status\"></p>\n\
         {script}\n\
         </body>\n\
         </html>\n",
        style = STYLE,
        document = document,
        pending_block = pending_block,
        label_options = label_options,
        annotation_rows = annotation_rows,
        script = script,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Annotation, PendingSelection};

    fn snapshot(document: &str) -> SessionSnapshot {
        SessionSnapshot {
            document: document.to_string(),
            labels: vec!["SKU".to_string()],
            pending: None,
            annotations: Vec::new(),
        }
    }

    #[test]
    fn test_document_is_rendered_literally() {
        let page = render_page(Uuid::new_v4(), &snapshot("<b>1 & 2</b>"));

        // Escaped, not interpreted as markup
        assert!(page.contains("<div id=\"text-container\">&lt;b&gt;1 &amp; 2&lt;/b&gt;</div>"));
        assert!(!page.contains("<div id=\"text-container\"><b>"));
    }

    #[test]
    fn test_container_has_no_padding_around_document() {
        // Leading whitespace inside the container would shift every offset
        // the bridge computes.
        let page = render_page(Uuid::new_v4(), &snapshot("Order SKU123 shipped"));
        assert!(page.contains("<div id=\"text-container\">Order SKU123 shipped</div>"));
    }

    #[test]
    fn test_session_id_is_embedded_in_script() {
        let id = Uuid::new_v4();
        let page = render_page(id, &snapshot("text"));
        assert!(page.contains(&format!("const SESSION = \"{}\";", id)));
    }

    #[test]
    fn test_pending_selection_is_shown() {
        let mut snap = snapshot("Order SKU123 shipped");
        snap.pending = Some(PendingSelection {
            text: "SKU123".to_string(),
            start: 6,
            end: 12,
        });

        let page = render_page(Uuid::new_v4(), &snap);
        assert!(page.contains("<strong>Selected Text:</strong> SKU123"));
        assert!(page.contains("<strong>Start Position:</strong> 6"));
        assert!(page.contains("<strong>End Position:</strong> 12"));
    }

    #[test]
    fn test_annotations_and_labels_are_escaped() {
        let mut snap = snapshot("doc");
        snap.labels.push("<ORG>".to_string());
        snap.annotations.push(Annotation {
            text: "<script>alert(1)</script>".to_string(),
            start: 0,
            end: 3,
            label: "<ORG>".to_string(),
        });

        let page = render_page(Uuid::new_v4(), &snap);
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("<option value=\"&lt;ORG&gt;\">&lt;ORG&gt;</option>"));
        assert!(!page.contains("<script>alert"));
    }
}
