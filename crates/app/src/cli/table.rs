use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

/// Render rows under `header`, right-aligning the `numeric` columns.
pub(crate) fn render<const N: usize>(
    header: [&str; N],
    rows: Vec<[String; N]>,
    numeric: &[usize],
) -> String {
    let mut builder = Builder::default();

    builder.push_record(header);

    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);

    for &column in numeric {
        table.modify(Columns::one(column), Alignment::right());
    }

    table.to_string()
}
