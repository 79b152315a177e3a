//! Built-in card template and insertable snippets.

use crate::surface::BufferKind;

/// The document a new card starts from.
pub const DEFAULT_CARD_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Greeting Card</title>
  <style>
    body {
      margin: 0;
      min-height: 100vh;
      display: flex;
      align-items: center;
      justify-content: center;
      font-family: Georgia, serif;
      background: linear-gradient(135deg, #fdf6e3, #f5d6c6);
    }
    .card {
      padding: 2rem 3rem;
      border-radius: 1rem;
      background: #fff;
      box-shadow: 0 10px 30px rgba(0, 0, 0, 0.15);
      text-align: center;
    }
  </style>
</head>
<body>
  <div class="card">
    <h1 id="greeting">Happy Eid!</h1>
    <p>Wishing you peace, joy and good company.</p>
  </div>
  <script>
    const greeting = document.getElementById("greeting");
    greeting.animate(
      [{ opacity: 0, transform: "translateY(20px)" }, { opacity: 1, transform: "none" }],
      { duration: 800, easing: "ease-out" }
    );
  </script>
</body>
</html>
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snippet {
    pub name: &'static str,
    /// Buffer the snippet is meant for
    pub kind: BufferKind,
    pub body: &'static str,
}

pub const BUILTIN_SNIPPETS: &[Snippet] = &[
    Snippet {
        name: "card",
        kind: BufferKind::Markup,
        body: "<div class=\"card\">\n  <h1>Title</h1>\n  <p>Your message</p>\n</div>\n",
    },
    Snippet {
        name: "heading",
        kind: BufferKind::Markup,
        body: "<h1 class=\"headline\">Happy Eid!</h1>\n",
    },
    Snippet {
        name: "script",
        kind: BufferKind::Markup,
        body: "<script>\n  document.querySelectorAll(\".card\").forEach((el) => {\n    el.classList.add(\"visible\");\n  });\n</script>\n",
    },
    Snippet {
        name: "fade-in",
        kind: BufferKind::Style,
        body: "@keyframes fade-in {\n  from { opacity: 0; }\n  to { opacity: 1; }\n}\n",
    },
    Snippet {
        name: "centered",
        kind: BufferKind::Style,
        body: "body {\n  display: flex;\n  align-items: center;\n  justify-content: center;\n  min-height: 100vh;\n}\n",
    },
];

/// Look up a built-in snippet by name.
pub fn find_snippet(name: &str) -> Option<&'static Snippet> {
    BUILTIN_SNIPPETS.iter().find(|s| s.name == name)
}

/// Built-in snippets meant for `kind`
pub fn snippets_for(kind: BufferKind) -> impl Iterator<Item = &'static Snippet> {
    BUILTIN_SNIPPETS.iter().filter(move |s| s.kind == kind)
}
