use assert_fs::TempDir;
use common::{documents_dir, run_antar_command, write_document};
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn tokenize_lists_every_token(documents_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    write_document(&documents_dir, "page.html", "<p>Hi, you</p>");

    run_antar_command(documents_dir.path(), &["tokenize", "page.html"])
        .assert()
        .success()
        .stdout("0\t-\t\"<p>\"\n1\t-\t\"Hi\"\n2\t-\t\",\"\n3\t-\t\" \"\n4\t-\t\"you\"\n5\t-\t\"</p>\"\n");

    Ok(())
}

#[rstest]
fn tokenize_reads_injected_metadata_when_scored(
    documents_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_document(
        &documents_dir,
        "page.html",
        r#"<p data-antar-score="5" data-antar-id="ab">Hi</p><!-- end antar-id#ab -->"#,
    );

    run_antar_command(documents_dir.path(), &["tokenize", "page.html", "--scored"])
        .assert()
        .success()
        .stdout("0\tab\t\"<p>\"\n1\tab\t\"Hi\"\n2\t-\t\"</p>\"\nscore ab 5\n");

    Ok(())
}

#[rstest]
fn opcodes_partition_both_documents(
    documents_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_document(&documents_dir, "old.txt", "a b c");
    write_document(&documents_dir, "new.txt", "a d c e");

    run_antar_command(documents_dir.path(), &["opcodes", "old.txt", "new.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "equal   old[0..2] new[0..2] \"a \" \"a \"",
        ))
        .stdout(predicate::str::contains(
            "replace old[2..3] new[2..3] \"b\" \"d\"",
        ))
        .stdout(predicate::str::contains(
            "insert  old[5..5] new[5..7] \"\" \" e\"",
        ));

    Ok(())
}
