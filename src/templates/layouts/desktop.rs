use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Foncier Niger" }
            }
            body {
                header {
                    h3 { a href="/" { "Foncier Niger" } }
                    nav {
                        ul {
                            li { a href="/" { "Accueil" } }
                            li { a href="/sections/parcelles" { "Parcelles" } }
                            li { a href="/sections/patrimoine" { "Biens" } }
                            li { a href="/search" { "Locations" } }
                            li { a href="/sections/notaires" { "Notaires" } }
                        }
                    }
                }
                main { (content) }
            }
        }
    }
}
