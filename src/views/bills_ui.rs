use crate::model::Bill;
use crate::views::{error_page, format_date, hooks, loading_page, vertical_layout, Nav};
use maud::{html, Markup};

/// What the bills page has to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillsView {
    Loading,
    Error(String),
    /// Bills in display order.
    Data(Vec<Bill>),
}

/// The bills page. Loading and error states get their own pages.
pub fn bills_ui(nav: &Nav, view: &BillsView) -> Markup {
    match view {
        BillsView::Loading => loading_page(nav),
        BillsView::Error(error) => error_page(nav, error),
        BillsView::Data(bills) => bills_table(nav, bills),
    }
}

fn bills_table(nav: &Nav, bills: &[Bill]) -> Markup {
    html! {
        div class="layout" {
            (vertical_layout(nav))
            div class="content" {
                div class="content-header" {
                    div class="content-title" { "Mes notes de frais" }
                    button type="button" data-testid=(hooks::BTN_NEW_BILL) class="btn btn-primary" { "Nouvelle note de frais" }
                }
                div id="data-table" {
                    table id="example" class="table table-striped" style="width:100%" {
                        thead {
                            tr {
                                th { "Type" }
                                th { "Nom" }
                                th { "Date" }
                                th { "Montant" }
                                th { "Statut" }
                                th { "Actions" }
                            }
                        }
                        tbody data-testid=(hooks::TBODY) {
                            @for bill in bills {
                                (bill_row(bill))
                            }
                        }
                    }
                }
            }
            div class="modal fade" id="modaleFile" tabindex="-1" role="dialog" {
                div class="modal-dialog modal-dialog-centered modal-lg" role="document" {
                    div class="modal-content" {
                        div class="modal-header" {
                            h5 class="modal-title" { "Justificatif" }
                        }
                        div class="modal-body" {}
                    }
                }
            }
        }
    }
}

fn bill_row(bill: &Bill) -> Markup {
    html! {
        tr {
            td { (bill.expense_type) }
            td { (bill.name) }
            td { (format_date(&bill.date)) }
            td { (bill.amount.to_string()) }
            td { (bill.status.label()) }
            td {
                div class="icon-actions" {
                    div id="eye" data-testid=(hooks::ICON_EYE) data-bill-url=(bill.file_url) { "👁" }
                }
            }
        }
    }
}

/// The receipt preview shown in the modal when the eye icon of a bill is clicked. `width` is the
/// width of the modal in pixels; the image takes half of it.
pub fn bill_proof(file_url: &str, width: u32) -> Markup {
    html! {
        div style="text-align: center;" class="bill-proof-container" {
            img width=(width / 2) src=(file_url) alt="Bill";
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, BillStatus};
    use crate::Session;

    fn nav() -> Nav {
        Nav::for_session(&Session::employee("e@e"))
    }

    #[test]
    fn test_error_is_rendered_verbatim() {
        for error in ["Erreur 404", "Erreur 500"] {
            let html = bills_ui(&nav(), &BillsView::Error(error.to_string())).into_string();
            assert!(html.contains(&format!(r#"data-testid="error-message">{error}</div>"#)));
        }
    }

    #[test]
    fn test_loading() {
        let html = bills_ui(&nav(), &BillsView::Loading).into_string();
        assert!(html.contains("Loading..."));
        assert!(!html.contains(hooks::TBODY));
    }

    #[test]
    fn test_rows() {
        let bills = vec![
            Bill {
                id: Some("1".to_string()),
                expense_type: "Hôtel et logement".to_string(),
                name: "encore".to_string(),
                amount: Amount::from(400),
                date: "2004-04-04".to_string(),
                file_url: "https://localhost:3456/images/test.jpg".to_string(),
                ..Bill::default()
            },
            Bill {
                id: Some("2".to_string()),
                name: "test2".to_string(),
                date: "2002-02-02".to_string(),
                status: BillStatus::Refused,
                ..Bill::default()
            },
        ];
        let html = bills_ui(&nav(), &BillsView::Data(bills)).into_string();
        assert!(html.contains("Mes notes de frais"));
        assert!(html.contains(r#"data-testid="btn-new-bill""#));
        assert!(html.contains("<td>4 Avr. 04</td>"));
        assert!(html.contains("<td>400 €</td>"));
        assert!(html.contains("<td>En attente</td>"));
        assert!(html.contains("<td>Refusé</td>"));
        assert!(html.contains(r#"data-bill-url="https://localhost:3456/images/test.jpg""#));
        assert_eq!(html.matches(r#"data-testid="icon-eye""#).count(), 2);
        assert!(html.find("encore").unwrap() < html.find("test2").unwrap());
    }

    #[test]
    fn test_empty_table() {
        let html = bills_ui(&nav(), &BillsView::Data(Vec::new())).into_string();
        assert!(html.contains(r#"<tbody data-testid="tbody"></tbody>"#));
    }

    #[test]
    fn test_bill_proof() {
        let html = bill_proof("https://localhost:3456/images/test.jpg", 800).into_string();
        assert!(html.contains(r#"<img width="400" src="https://localhost:3456/images/test.jpg" alt="Bill">"#));
    }
}
