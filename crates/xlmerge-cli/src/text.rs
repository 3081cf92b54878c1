//! Static texts for the `about` and `conclusion` commands.

pub const ABOUT_TITLE: &str = "Excel Data Cleaning & Visualization";

pub const ABOUT_OVERVIEW: &str = "xlmerge automates a small spreadsheet workflow:\n\
    \n  1) load every .xlsx file in a folder\
    \n  2) merge them and clean the result (duplicate and incomplete rows removed)\
    \n  3) save the cleaned data to a new .xlsx file and a database table\
    \n  4) render charts from the cleaned file";

pub const ABOUT_STEPS: [(&str, &str); 6] = [
    (
        "Collect the spreadsheets",
        "Every .xlsx file directly inside the chosen folder is picked up, in file name order.",
    ),
    (
        "Load and merge",
        "The first worksheet of each file is read. Rows are stacked; columns are matched by \
         header name and cells missing from a file stay empty.",
    ),
    (
        "Clean",
        "Rows repeating an earlier row are dropped, then rows with any empty cell.",
    ),
    (
        "Save the cleaned file",
        "The cleaned data is written to a new .xlsx file with a header row.",
    ),
    (
        "Upload to the database",
        "Column types are detected (integer, float, date, text) and the destination table is \
         recreated with matching column types before every row is inserted.",
    ),
    (
        "Visualize",
        "Line, bar, pie, scatter, histogram and correlation heatmap charts are rendered to SVG \
         from the cleaned file.",
    ),
];

pub const CONCLUSION_TITLE: &str = "End Results";

pub const CONCLUSION_POINTS: [&str; 4] = [
    "Merging, cleaning, saving and uploading run as one repeatable command.",
    "Cleaning is deterministic, so the same folder always yields the same file and table.",
    "Every stage reports its own outcome; one failing stage does not hide the others.",
    "Charts are plain SVG files that can be opened in any browser or embedded in reports.",
];
