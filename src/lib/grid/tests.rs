use proptest::{
    prelude::*,
    test_runner::{Config, TestRunner},
};
use serde::Serialize;

use super::*;
use crate::{html::tag, tags::link_to};

#[derive(Serialize)]
struct Ticket {
    id: u32,
    group_name: String,
    options: Option<String>,
}

fn tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            id: 1,
            group_name: "Admins & co".to_string(),
            options: Some("edit".to_string()),
        },
        Ticket {
            id: 2,
            group_name: "Users".to_string(),
            options: None,
        },
    ]
}

#[test]
fn basic_grid() {
    let grid = Grid::new(&tickets(), &[NUMBERED, "group_name", "options"]).unwrap();
    assert_eq!(
        grid.render(),
        "<tr class=\"header\"><td class=\"c1 numbered\">no.</td>\
         <td class=\"c2 group_name\">Group Name</td><td class=\"c3 options\">Options</td></tr>\
         <tr class=\"even\"><td class=\"c1\">1</td><td class=\"c2\">Admins &amp; co</td>\
         <td class=\"c3\">edit</td></tr>\
         <tr class=\"odd\"><td class=\"c1\">2</td><td class=\"c2\">Users</td>\
         <td class=\"c3\"></td></tr>"
    );
}

#[test]
fn no_records_is_just_the_header() {
    let none: Vec<Ticket> = Vec::new();
    let grid = Grid::new(&none, &["id"]).unwrap();
    assert_eq!(grid.render(), "<tr class=\"header\"><td class=\"c1 id\">Id</td></tr>");
}

#[test]
fn labels_and_start_number() {
    let grid = Grid::new(&tickets(), &[NUMBERED, "options"])
        .unwrap()
        .label("options", "Actions <all>")
        .start_number(10);
    let out = grid.render();
    assert!(out.as_str().contains("<td class=\"c2 options\">Actions &lt;all&gt;</td>"));
    assert!(out.as_str().contains("<tr class=\"even\"><td class=\"c1\">10</td>"));
    assert!(out.as_str().contains("<tr class=\"odd\"><td class=\"c1\">11</td>"));
}

#[test]
fn custom_column_format() {
    let grid = Grid::new(&tickets(), &["group_name", "actions"])
        .unwrap()
        .format("actions", |col, _, record| {
            let url = format!("/tickets/view?ticket_id={}", record["id"]);
            let link = link_to("view", &url, Attrs::new());
            let class = format!("c{col}");
            tag("td", &[&link], &Attrs::new().set("class", class.as_str())).unwrap()
        });
    assert!(grid.render().as_str().ends_with(
        "<tr class=\"odd\"><td class=\"c1\">Users</td>\
         <td class=\"c2\"><a href=\"/tickets/view?ticket_id=2\">view</a></td></tr>"
    ));
}

#[test]
fn custom_row_format() {
    let grid = Grid::new(&tickets(), &["id"])
        .unwrap()
        .row_format(|i, _, class, cells| {
            Literal::new(format!("<tr class=\"{class}\" id=\"row{i}\">")) + cells
                + Literal::new("</tr>")
        });
    assert_eq!(
        grid.render(),
        "<tr class=\"header\"><td class=\"c1 id\">Id</td></tr>\
         <tr class=\"even\" id=\"row0\"><td class=\"c1\">1</td></tr>\
         <tr class=\"odd\" id=\"row1\"><td class=\"c1\">2</td></tr>"
    );
}

#[test]
fn ordering_links_in_headers() {
    let grid = Grid::new(&tickets(), &[NUMBERED, "group_name", "options"])
        .unwrap()
        .ordering(Some(("group_name", OrderDirection::Asc)), |column, dir| {
            format!("?order_col={column}&order_dir={}", dir.as_str())
        });
    let out = grid.render();
    assert!(out.as_str().starts_with(
        "<tr class=\"header\"><td class=\"c1 numbered\">no.</td>\
         <td class=\"c2 ordering asc group_name\">\
         <a href=\"?order_col=group_name&amp;order_dir=dsc\">Group Name</a>\
         <span class=\"marker\"></span></td>\
         <td class=\"c3 options\">\
         <a href=\"?order_col=options&amp;order_dir=asc\">Options</a></td></tr>"
    ));
}

#[test]
fn descending_column_flips_back_to_ascending() {
    let grid = Grid::new(&tickets(), &["id"])
        .unwrap()
        .ordering(Some(("id", OrderDirection::Dsc)), |column, dir| {
            format!("?sort={column}.{}", dir.as_str())
        });
    assert!(grid.render().as_str().starts_with(
        "<tr class=\"header\"><td class=\"c1 ordering dsc id\">\
         <a href=\"?sort=id.asc\">Id</a><span class=\"marker\"></span></td></tr>"
    ));
}

#[test]
fn excluded_column_keeps_plain_header() {
    let grid = Grid::new(&tickets(), &["id"])
        .unwrap()
        .ordering(None, |column, _| format!("?sort={column}"))
        .exclude_ordering("id");
    assert!(
        grid.render()
            .as_str()
            .starts_with("<tr class=\"header\"><td class=\"c1 id\">Id</td></tr>")
    );
}

#[test]
fn missing_fields_render_empty_cells() {
    let grid = Grid::new(&tickets(), &["id", "owner"]).unwrap();
    assert!(
        grid.render()
            .as_str()
            .contains("<tr class=\"even\"><td class=\"c1\">1</td><td class=\"c2\"></td></tr>")
    );
}

#[test]
fn records_must_be_objects() {
    assert!(Grid::new(&[1, 2, 3], &["id"]).is_err());
    assert!(Grid::new(&["a"], &["id"]).is_err());
}

#[test]
fn grid_is_trusted_markup() {
    let grid = Grid::new(&tickets(), &["id"]).unwrap();
    assert_eq!(escape(&grid), grid.render());

    let table = tag("table", &[&grid], &Attrs::new()).unwrap();
    assert!(table.as_str().starts_with("<table><tr class=\"header\">"));
    assert!(table.as_str().ends_with("</tr></table>"));
}

#[test]
fn rows_alternate_even_and_odd() {
    let mut runner = TestRunner::new(Config {
        failure_persistence: None,
        ..Config::default()
    });
    runner
        .run(&(0usize..30), |count| {
            let records: Vec<Ticket> = (0..count)
                .map(|i| Ticket {
                    id: i as u32,
                    group_name: format!("group {i}"),
                    options: None,
                })
                .collect();
            let out = Grid::new(&records, &[NUMBERED]).unwrap().render();
            let out = out.as_str();
            prop_assert_eq!(out.matches("<tr class=\"even\">").count(), count.div_ceil(2));
            prop_assert_eq!(out.matches("<tr class=\"odd\">").count(), count / 2);
            prop_assert_eq!(out.matches("<tr class=\"header\">").count(), 1);
            Ok(())
        })
        .unwrap();
}
