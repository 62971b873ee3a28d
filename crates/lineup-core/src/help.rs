use crate::host::Host;
use crate::session::{Runtime, Sched};
use crate::table::TableRenderer;

const CHAT_TAG: &str = "[lineup]";
const DEMO_LINK: &str = "https://youtu.be/DPoonBCAjiw";
const ANNOTATION_FOLDER: &str = "C:/Program Files (x86)/Steam/steamapps/common/Counter-Strike Global Offensive/game/csgo/annotations/local";
const COPY_TIP: &str = "(Tip) To copy text from chat: left-click and drag to highlight, then right-click and select 'Copy highlighted text'.";

// ---------------------------------------------------------------------------
// Command reference table
// ---------------------------------------------------------------------------

/// Rows of the 3-column command reference: command, example, description.
pub fn help_rows() -> Vec<Vec<String>> {
    let rows: &[[&str; 3]] = &[
        ["Command", "Example usage", "Description"],
        ["/help", "/help", "Prints this command reference in the console."],
        ["/demo", "/demo", "Prints a link to the demonstration video."],
        [
            "/cleanup\n/cu",
            "/cleanup",
            "Kills live grenades (e.g. bloomed smokes and burning mollies).",
        ],
        [
            "/rethrow\n/rt",
            "/rethrow",
            "Re-throws the last grenade you threw.",
        ],
        [
            "/crouch\n/c",
            "/crouch",
            "Toggles crouching. Useful for crouching lineups where holding CTRL blocks chat.",
        ],
        [
            "/autoadd <label>\n/a <label>",
            "/autoadd Monster smoke",
            "Annotates your last-thrown grenade, teleporting you back to the throw position.\n\nWorks for standing, crouching, and jumping throws, but NOT moving throws; use /addnextthrow or /addlastthrow for those.",
        ],
        [
            "/addlastthrow <label>\n/alt <label>",
            "/addlastthrow Window smoke",
            "Annotates your last-thrown grenade from your current position.\n\nThrow, walk back to the lineup spot, stand still, and run the command.",
        ],
        [
            "/addnextthrow <label>\n/ant <label>",
            "/addnextthrow Window smoke",
            "Annotates the next grenade you throw using your current position.\n\nStand in the lineup spot, run the command (it arms), then throw.",
        ],
        [
            "/addshot <label>\n/as <label>",
            "/addshot Connector smoke",
            "Annotates your last grenade from the next position you fire a weapon from. Handy when you cannot type (e.g. crouch-walking lineups).",
        ],
        [
            "/addspot\n/spot",
            "/addspot",
            "Creates a floating spot where your crosshair is aiming.",
        ],
        [
            "/addtext [<title>] [<description>]\n/text [<title>] [<description>]",
            "/addtext [Big text] [Small text]",
            "Creates a floating text annotation facing the player.\n\nWrap each parameter in square brackets []. Title or description may be omitted, but not both.",
        ],
        ["/undo", "/undo", "Deletes the last annotation created."],
        [
            "/clearall",
            "/clearall",
            "Clears all loaded annotations. Cleared annotations cannot be restored.",
        ],
        ["/save", "/save", "Saves all changes to the currently loaded file."],
        [
            "/saveas <filename>",
            "/saveas new_nuke_nades",
            "Saves all loaded annotations to a new file. Filename cannot contain spaces; an existing file is overwritten.",
        ],
        [
            "/load <filename>",
            "/load new_nuke_nades",
            "Loads annotations from the given file in the default save location. A missing file is created on the next /save.",
        ],
        [
            "/loaddefault",
            "/loaddefault",
            "Loads annotations from the map's default file (lineup_<mapname>.txt).",
        ],
        [
            "/preset",
            "/preset",
            "Appends a premade annotation set for the current map.",
        ],
        [
            "/reload",
            "/reload",
            "Re-loads the current annotations. Fixes annotation elements that stopped rendering.",
        ],
        [
            "/append <filename>",
            "/append other_ancient_nades",
            "Adds all annotations from the given file without deleting existing ones. Remember to save afterwards.",
        ],
        [
            "/discard",
            "/discard",
            "Reloads the current file, permanently dropping all unsaved annotations.",
        ],
        [
            "/files",
            "/files",
            "Prints the folder where annotation files are saved by default.",
        ],
        [
            "/radar",
            "/radar",
            "Toggles radar visibility. The radar is hidden by default so it does not cover messages.",
        ],
        [
            "/restart",
            "/restart",
            "Restarts the match. Unsaved changes are lost.",
        ],
        ["/debug", "/debug", "Toggles the debug value display."],
    ];

    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

// ---------------------------------------------------------------------------
// Console output
// ---------------------------------------------------------------------------

fn print_header<H: Host>(rt: &mut Runtime<H>) {
    rt.host.console_msg("");
    rt.host.console_msg("=== lineup v0.1 ===");
    rt.host.console_msg("");
}

pub fn print_help<H: Host>(rt: &mut Runtime<H>) {
    print_header(rt);
    rt.host.console_msg(
        "Note: run these commands from in-game chat (NOT the developer console), and \
         INCLUDE the square brackets [] when passing more than one parameter.",
    );

    let table = TableRenderer::new(rt.config.help_table_columns, rt.config.help_table_width)
        .render(&help_rows());
    for line in table.lines() {
        rt.host.console_msg(line);
    }

    rt.panel
        .notify("Open your console for the full command list.");
}

pub fn print_demo_link<H: Host + 'static>(rt: &mut Runtime<H>, sched: &mut Sched<H>) {
    print_header(rt);
    let message = format!("Watch the demonstration video: {DEMO_LINK}");
    rt.host.console_msg(&message);
    relay_to_chat(rt, sched, message, true);

    rt.panel
        .notify("Check the console or in-game chat for the demo video link.");
}

pub fn print_files_path<H: Host + 'static>(rt: &mut Runtime<H>, sched: &mut Sched<H>) {
    print_header(rt);
    let message = format!("Default save location for annotation files: {ANNOTATION_FOLDER}");
    rt.host.console_msg(&message);
    relay_to_chat(rt, sched, message, true);

    rt.panel
        .notify("Check the console or in-game chat for the annotation folder path.");
}

/// Relay a console message into chat so the player can copy it. Deferred so
/// the relay lands after the engine's own echo of the triggering command.
fn relay_to_chat<H: Host + 'static>(
    rt: &mut Runtime<H>,
    sched: &mut Sched<H>,
    message: String,
    include_copy_tip: bool,
) {
    if include_copy_tip {
        let tip = format!("{CHAT_TAG} {COPY_TIP}");
        sched.schedule_once(rt.config.chat_tip_delay_ticks, move |rt: &mut Runtime<H>| {
            rt.host.say(&tip)
        });
    }

    let line = format!("{CHAT_TAG} {message}");
    sched.schedule_once(
        rt.config.chat_relay_delay_ticks,
        move |rt: &mut Runtime<H>| rt.host.say(&line),
    );
}
